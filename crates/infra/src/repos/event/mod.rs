mod inmemory;
mod postgres;

use crate::repos::shared::query_structs::EventQuery;
use agenda_domain::{Event, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    async fn save(&self, e: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    async fn find_by_user(&self, query: &EventQuery) -> anyhow::Result<Vec<Event>>;
    /// Deletes the `Event` together with its `Reminder`s and `NotificationLog`s
    async fn delete(&self, event_id: &ID) -> Option<Event>;
}

#[cfg(test)]
mod tests {
    use crate::repos::shared::query_structs::{EventOrderField, EventQuery, OrderBy};
    use crate::AgendaContext;
    use agenda_domain::{Event, NotificationLog, Reminder, ReminderChannel, User, ID};
    use chrono::{prelude::*, Duration};

    async fn setup() -> (AgendaContext, User) {
        let ctx = AgendaContext::create_inmemory();
        let user = User::new("alice", "alice@example.com", "token".into()).unwrap();
        ctx.repos.users.insert(&user).await.unwrap();
        (ctx, user)
    }

    fn event(user_id: ID, title: &str, start: DateTime<Utc>, hours: i64) -> Event {
        Event::new(user_id, title.into(), start, start + Duration::hours(hours))
    }

    #[tokio::test]
    async fn it_filters_and_orders_events() {
        let (ctx, user) = setup().await;
        let day = Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap();
        let mut standup = event(user.id, "Standup", day + Duration::hours(9), 1);
        standup.description = "Daily SYNC".into();
        let review = event(user.id, "Review", day + Duration::hours(14), 1);
        let next_day = event(user.id, "Planning", day + Duration::hours(33), 1);
        let other_user = event(ID::default(), "Not mine", day + Duration::hours(9), 1);
        for e in [&standup, &review, &next_day, &other_user] {
            ctx.repos.events.insert(e).await.unwrap();
        }

        let mut query = EventQuery::for_user(user.id);
        let titles = |events: Vec<Event>| events.into_iter().map(|e| e.title).collect::<Vec<_>>();
        assert_eq!(
            titles(ctx.repos.events.find_by_user(&query).await.unwrap()),
            vec!["Standup", "Review", "Planning"]
        );

        query.order_by = OrderBy::desc(EventOrderField::Title);
        assert_eq!(
            titles(ctx.repos.events.find_by_user(&query).await.unwrap()),
            vec!["Standup", "Review", "Planning"]
        );
        query.order_by = OrderBy::asc(EventOrderField::Title);
        assert_eq!(
            titles(ctx.repos.events.find_by_user(&query).await.unwrap()),
            vec!["Planning", "Review", "Standup"]
        );

        let mut query = EventQuery::for_user(user.id);
        query.touching = Some((day, day + Duration::hours(24) - Duration::microseconds(1)));
        assert_eq!(
            titles(ctx.repos.events.find_by_user(&query).await.unwrap()),
            vec!["Standup", "Review"]
        );

        let mut query = EventQuery::for_user(user.id);
        query.search = Some("sync".into());
        assert_eq!(
            titles(ctx.repos.events.find_by_user(&query).await.unwrap()),
            vec!["Standup"]
        );

        let mut query = EventQuery::for_user(user.id);
        query.start_after = Some(day + Duration::hours(10));
        query.end_before = Some(day + Duration::hours(20));
        assert_eq!(
            titles(ctx.repos.events.find_by_user(&query).await.unwrap()),
            vec!["Review"]
        );

        let mut query = EventQuery::for_user(user.id);
        query.is_all_day = Some(true);
        assert!(ctx.repos.events.find_by_user(&query).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn it_cascades_event_deletion() {
        let (ctx, user) = setup().await;
        let e = event(user.id, "Dentist", Utc::now() + Duration::hours(2), 1);
        ctx.repos.events.insert(&e).await.unwrap();
        let reminder = Reminder::new(&e, 15, ReminderChannel::Email).unwrap();
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        let log = NotificationLog::sent(&e, &reminder, Utc::now());
        ctx.repos.notification_logs.insert(&log).await.unwrap();

        let deleted = ctx.repos.events.delete(&e.id).await;
        assert_eq!(deleted, Some(e.clone()));
        assert!(ctx.repos.events.find(&e.id).await.is_none());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
        assert!(ctx.repos.notification_logs.find(&log.id).await.is_none());
        assert!(ctx.repos.events.delete(&e.id).await.is_none());
    }
}
