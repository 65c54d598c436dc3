mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::{OrderBy, ReminderOrderField};
use agenda_domain::{NotificationLog, Reminder, ID};
use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Updates the event, lead time, channel and `scheduled_for`. The sent
    /// state is only ever written through `lock_for_dispatch`.
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// `Reminder`s of a single `Event` ordered by `scheduled_for`
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_events(&self, event_ids: &[ID]) -> anyhow::Result<Vec<Reminder>>;
    /// `Reminder`s of all the `Event`s owned by the `User`
    async fn find_by_user(
        &self,
        user_id: &ID,
        order_by: OrderBy<ReminderOrderField>,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Unsent `Reminder`s with `scheduled_for <= now`, ordered by `scheduled_for`
    async fn find_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>>;
    /// Deletes the `Reminder`. `NotificationLog`s pointing at it are kept
    /// but lose the reference.
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()>;
    /// Takes an exclusive lock on the `Reminder` row and re-reads it.
    /// Returns `None` when the `Reminder` no longer exists. The lock is
    /// held until the returned `IReminderLock` is committed or dropped.
    async fn lock_for_dispatch(
        &self,
        reminder_id: &ID,
    ) -> anyhow::Result<Option<Box<dyn IReminderLock>>>;
}

/// A `Reminder` locked for dispatching. Changes are only persisted on
/// `commit`, dropping the lock discards them.
#[async_trait::async_trait]
pub trait IReminderLock: Send {
    /// The `Reminder` as it was when the lock was taken
    fn reminder(&self) -> &Reminder;
    async fn append_log(&mut self, log: &NotificationLog) -> anyhow::Result<()>;
    async fn mark_sent(&mut self, sent_at: DateTime<Utc>) -> anyhow::Result<()>;
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
}
