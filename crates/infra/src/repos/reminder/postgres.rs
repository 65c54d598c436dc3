use super::{IReminderLock, IReminderRepo};
use crate::repos::notification_log::insert_log;
use crate::repos::shared::query_structs::{OrderBy, ReminderOrderField};
use agenda_domain::{NotificationLog, Reminder, ReminderChannel, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, Transaction};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    event_uid: Uuid,
    minutes_before: i32,
    channel: String,
    scheduled_for: DateTime<Utc>,
    is_sent: bool,
    sent_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        Ok(Reminder::restore(
            raw.reminder_uid.into(),
            raw.event_uid.into(),
            raw.minutes_before as i64,
            raw.channel.parse::<ReminderChannel>()?,
            raw.scheduled_for,
            raw.is_sent,
            raw.sent_at,
        ))
    }
}

fn to_reminders(raws: Vec<ReminderRaw>) -> anyhow::Result<Vec<Reminder>> {
    raws.into_iter().map(|raw| raw.try_into()).collect()
}

fn minutes_before(reminder: &Reminder) -> anyhow::Result<i32> {
    Ok(i32::try_from(reminder.minutes_before)?)
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders(
                reminder_uid,
                event_uid,
                minutes_before,
                channel,
                scheduled_for,
                is_sent,
                sent_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.event_id.inner_ref())
        .bind(minutes_before(reminder)?)
        .bind(reminder.channel.as_str())
        .bind(reminder.scheduled_for())
        .bind(reminder.is_sent)
        .bind(reminder.sent_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders SET
                event_uid = $2,
                minutes_before = $3,
                channel = $4,
                scheduled_for = $5
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.event_id.inner_ref())
        .bind(minutes_before(reminder)?)
        .bind(reminder.channel.as_str())
        .bind(reminder.scheduled_for())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let raw = match sqlx::query_as::<_, ReminderRaw>(
            "SELECT * FROM reminders WHERE reminder_uid = $1",
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(raw) => raw?,
            Err(e) => {
                error!("Unable to find reminder {}: {:?}", reminder_id, e);
                return None;
            }
        };
        raw.try_into().ok()
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(
            "SELECT * FROM reminders WHERE event_uid = $1 ORDER BY scheduled_for",
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        to_reminders(raws)
    }

    async fn find_by_events(&self, event_ids: &[ID]) -> anyhow::Result<Vec<Reminder>> {
        let event_ids = event_ids.iter().map(|id| id.inner()).collect::<Vec<_>>();
        let raws = sqlx::query_as::<_, ReminderRaw>(
            "SELECT * FROM reminders WHERE event_uid = ANY($1) ORDER BY scheduled_for",
        )
        .bind(&event_ids)
        .fetch_all(&self.pool)
        .await?;
        to_reminders(raws)
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        order_by: OrderBy<ReminderOrderField>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let column = match order_by.field {
            ReminderOrderField::ScheduledFor => "r.scheduled_for",
            ReminderOrderField::MinutesBefore => "r.minutes_before",
        };
        let direction = if order_by.descending { "DESC" } else { "ASC" };
        let query = format!(
            r#"
            SELECT r.* FROM reminders AS r
            INNER JOIN events AS e ON e.event_uid = r.event_uid
            WHERE e.user_uid = $1
            ORDER BY {} {}
            "#,
            column, direction
        );
        let raws = sqlx::query_as::<_, ReminderRaw>(&query)
            .bind(user_id.inner_ref())
            .fetch_all(&self.pool)
            .await?;
        to_reminders(raws)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let raws = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE is_sent = FALSE AND scheduled_for <= $1
            ORDER BY scheduled_for
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        to_reminders(raws)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let raw = match sqlx::query_as::<_, ReminderRaw>(
            "DELETE FROM reminders WHERE reminder_uid = $1 RETURNING *",
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        {
            Ok(raw) => raw?,
            Err(e) => {
                error!("Unable to delete reminder {}: {:?}", reminder_id, e);
                return None;
            }
        };
        raw.try_into().ok()
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM reminders WHERE event_uid = $1")
            .bind(event_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn lock_for_dispatch(
        &self,
        reminder_id: &ID,
    ) -> anyhow::Result<Option<Box<dyn IReminderLock>>> {
        let mut tx = self.pool.begin().await?;
        let raw = sqlx::query_as::<_, ReminderRaw>(
            "SELECT * FROM reminders WHERE reminder_uid = $1 FOR UPDATE",
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&mut *tx)
        .await?;

        match raw {
            Some(raw) => Ok(Some(Box::new(PostgresReminderLock {
                tx,
                reminder: raw.try_into()?,
            }))),
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }
}

struct PostgresReminderLock {
    tx: Transaction<'static, Postgres>,
    reminder: Reminder,
}

#[async_trait::async_trait]
impl IReminderLock for PostgresReminderLock {
    fn reminder(&self) -> &Reminder {
        &self.reminder
    }

    async fn append_log(&mut self, log: &NotificationLog) -> anyhow::Result<()> {
        insert_log(&mut *self.tx, log).await
    }

    async fn mark_sent(&mut self, sent_at: DateTime<Utc>) -> anyhow::Result<()> {
        sqlx::query("UPDATE reminders SET is_sent = TRUE, sent_at = $2 WHERE reminder_uid = $1")
            .bind(self.reminder.id.inner_ref())
            .bind(sent_at)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
