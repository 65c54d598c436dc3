mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::{NotificationLogOrderField, OrderBy};
use agenda_domain::{NotificationLog, ID};
pub use inmemory::InMemoryNotificationLogRepo;
pub(crate) use postgres::insert_log;
pub use postgres::PostgresNotificationLogRepo;

/// `NotificationLog`s are append only, so there is no way to update or
/// delete them here.
#[async_trait::async_trait]
pub trait INotificationLogRepo: Send + Sync {
    async fn insert(&self, log: &NotificationLog) -> anyhow::Result<()>;
    async fn find(&self, log_id: &ID) -> Option<NotificationLog>;
    async fn find_by_user(
        &self,
        user_id: &ID,
        order_by: OrderBy<NotificationLogOrderField>,
    ) -> anyhow::Result<Vec<NotificationLog>>;
}
