mod event;
mod notification_log;
mod reminder;
mod shared;
mod user;

pub use event::IEventRepo;
use event::{InMemoryEventRepo, PostgresEventRepo};
pub use notification_log::INotificationLogRepo;
use notification_log::{InMemoryNotificationLogRepo, PostgresNotificationLogRepo};
pub use reminder::{IReminderLock, IReminderRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use shared::inmemory_repo::InMemoryTables;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
pub use user::IUserRepo;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use shared::query_structs::*;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub events: Arc<dyn IEventRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub notification_logs: Arc<dyn INotificationLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            notification_logs: Arc::new(PostgresNotificationLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let tables = InMemoryTables::new();
        Self {
            users: Arc::new(InMemoryUserRepo::new(tables.clone())),
            events: Arc::new(InMemoryEventRepo::new(tables.clone())),
            reminders: Arc::new(InMemoryReminderRepo::new(tables.clone())),
            notification_logs: Arc::new(InMemoryNotificationLogRepo::new(tables)),
        }
    }
}
