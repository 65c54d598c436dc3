use super::INotificationLogRepo;
use crate::repos::shared::query_structs::{NotificationLogOrderField, OrderBy};
use agenda_domain::{NotificationLog, ReminderChannel, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, Executor, FromRow, PgPool, Postgres};
use tracing::error;

pub struct PostgresNotificationLogRepo {
    pool: PgPool,
}

impl PostgresNotificationLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationLogRaw {
    notification_log_uid: Uuid,
    event_uid: Uuid,
    reminder_uid: Option<Uuid>,
    user_uid: Uuid,
    channel: String,
    status: String,
    error_message: String,
    created: DateTime<Utc>,
}

impl TryFrom<NotificationLogRaw> for NotificationLog {
    type Error = anyhow::Error;

    fn try_from(raw: NotificationLogRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.notification_log_uid.into(),
            event_id: raw.event_uid.into(),
            reminder_id: raw.reminder_uid.map(|id| id.into()),
            user_id: raw.user_uid.into(),
            channel: raw.channel.parse::<ReminderChannel>()?,
            status: raw.status.parse()?,
            error_message: raw.error_message,
            created: raw.created,
        })
    }
}

/// Inserts the log with the given executor, which lets the dispatch of
/// a reminder write its log inside the row locking transaction.
pub(crate) async fn insert_log<'e, E>(executor: E, log: &NotificationLog) -> anyhow::Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO notification_logs(
            notification_log_uid,
            event_uid,
            reminder_uid,
            user_uid,
            channel,
            status,
            error_message,
            created
        )
        VALUES($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(log.id.inner_ref())
    .bind(log.event_id.inner_ref())
    .bind(log.reminder_id.map(|id| id.inner()))
    .bind(log.user_id.inner_ref())
    .bind(log.channel.as_str())
    .bind(log.status.as_str())
    .bind(&log.error_message)
    .bind(log.created)
    .execute(executor)
    .await?;
    Ok(())
}

#[async_trait::async_trait]
impl INotificationLogRepo for PostgresNotificationLogRepo {
    async fn insert(&self, log: &NotificationLog) -> anyhow::Result<()> {
        insert_log(&self.pool, log).await
    }

    async fn find(&self, log_id: &ID) -> Option<NotificationLog> {
        let raw = match sqlx::query_as::<_, NotificationLogRaw>(
            "SELECT * FROM notification_logs WHERE notification_log_uid = $1",
        )
        .bind(log_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(raw) => raw?,
            Err(e) => {
                error!("Unable to find notification log {}: {:?}", log_id, e);
                return None;
            }
        };
        match raw.try_into() {
            Ok(log) => Some(log),
            Err(e) => {
                error!("Corrupt notification log {}: {:?}", log_id, e);
                None
            }
        }
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        order_by: OrderBy<NotificationLogOrderField>,
    ) -> anyhow::Result<Vec<NotificationLog>> {
        let column = match order_by.field {
            NotificationLogOrderField::CreatedAt => "created",
        };
        let direction = if order_by.descending { "DESC" } else { "ASC" };
        let query = format!(
            "SELECT * FROM notification_logs WHERE user_uid = $1 ORDER BY {} {}",
            column, direction
        );
        sqlx::query_as::<_, NotificationLogRaw>(&query)
            .bind(user_id.inner_ref())
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|raw| raw.try_into())
            .collect()
    }
}
