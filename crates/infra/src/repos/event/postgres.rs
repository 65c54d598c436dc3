use super::IEventRepo;
use crate::repos::shared::query_structs::{EventOrderField, EventQuery};
use agenda_domain::{Event, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, QueryBuilder};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: String,
    location: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    is_all_day: bool,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl From<EventRaw> for Event {
    fn from(raw: EventRaw) -> Self {
        Self {
            id: raw.event_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            location: raw.location,
            start: raw.start_ts,
            end: raw.end_ts,
            is_all_day: raw.is_all_day,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

fn order_column(field: EventOrderField) -> &'static str {
    match field {
        EventOrderField::Start => "start_ts",
        EventOrderField::End => "end_ts",
        EventOrderField::Title => "title",
    }
}

/// Escapes the LIKE wildcards of a user given search term
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events(
                event_uid,
                user_uid,
                title,
                description,
                location,
                start_ts,
                end_ts,
                is_all_day,
                created,
                updated
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.user_id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.location)
        .bind(e.start)
        .bind(e.end)
        .bind(e.is_all_day)
        .bind(e.created)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                description = $3,
                location = $4,
                start_ts = $5,
                end_ts = $6,
                is_all_day = $7,
                updated = $8
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.location)
        .bind(e.start)
        .bind(e.end)
        .bind(e.is_all_day)
        .bind(e.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        match sqlx::query_as::<_, EventRaw>("SELECT * FROM events WHERE event_uid = $1")
            .bind(event_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
        {
            Ok(event) => event.map(|e| e.into()),
            Err(e) => {
                error!("Unable to find event {}: {:?}", event_id, e);
                None
            }
        }
    }

    async fn find_by_user(&self, query: &EventQuery) -> anyhow::Result<Vec<Event>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM events WHERE user_uid = ");
        builder.push_bind(*query.user_id.inner_ref());
        if let Some(start_after) = query.start_after {
            builder.push(" AND start_ts >= ").push_bind(start_after);
        }
        if let Some(end_before) = query.end_before {
            builder.push(" AND end_ts <= ").push_bind(end_before);
        }
        if let Some((start, end)) = query.touching {
            builder
                .push(" AND end_ts >= ")
                .push_bind(start)
                .push(" AND start_ts <= ")
                .push_bind(end);
        }
        if let Some(is_all_day) = query.is_all_day {
            builder.push(" AND is_all_day = ").push_bind(is_all_day);
        }
        if let Some(search) = &query.search {
            let pattern = like_pattern(search);
            builder
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR location ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder
            .push(" ORDER BY ")
            .push(order_column(query.order_by.field))
            .push(if query.order_by.descending {
                " DESC"
            } else {
                " ASC"
            })
            .push(", created ASC");

        let events = builder
            .build_query_as::<EventRaw>()
            .fetch_all(&self.pool)
            .await?;
        Ok(events.into_iter().map(|e| e.into()).collect())
    }

    async fn delete(&self, event_id: &ID) -> Option<Event> {
        match sqlx::query_as::<_, EventRaw>("DELETE FROM events WHERE event_uid = $1 RETURNING *")
            .bind(event_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
        {
            Ok(event) => event.map(|e| e.into()),
            Err(e) => {
                error!("Unable to delete event {}: {:?}", event_id, e);
                None
            }
        }
    }
}
