use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::get_events::*;
use agenda_domain::{day_bounds, parse_date, Event, Reminder, User};
use agenda_infra::{AgendaContext, EventOrderField, EventQuery, OrderBy};
use chrono::{DateTime, Utc};

pub async fn get_events_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let query = query_params.0;
    let usecase = GetEventsUseCase {
        user,
        start_after: query.start_after,
        end_before: query.end_before,
        date: query.date,
        is_all_day: query.is_all_day,
        search: query.search,
        ordering: query.ordering,
    };

    execute(usecase, &ctx)
        .await
        .map(|(events, reminders)| HttpResponse::Ok().json(APIResponse::new(events, reminders)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub user: User,
    pub start_after: Option<DateTime<Utc>>,
    pub end_before: Option<DateTime<Utc>>,
    /// `YYYY-MM-DD` in the configured time zone
    pub date: Option<String>,
    pub is_all_day: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDate(String),
    InvalidOrdering(String),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDate(date) => Self::BadClientData(format!(
                "The date: {}, is not a valid YYYY-MM-DD date.",
                date
            )),
            UseCaseError::InvalidOrdering(ordering) => Self::BadClientData(format!(
                "Events can not be ordered by: {}. Use start, end or title.",
                ordering
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl GetEventsUseCase {
    /// All the `Event`s of the `User` ordered by start
    pub fn new(user: User) -> Self {
        Self {
            user,
            start_after: None,
            end_before: None,
            date: None,
            is_all_day: None,
            search: None,
            ordering: None,
        }
    }

    fn query(&self, ctx: &AgendaContext) -> Result<EventQuery, UseCaseError> {
        let mut query = EventQuery::for_user(self.user.id);
        query.start_after = self.start_after;
        query.end_before = self.end_before;
        query.is_all_day = self.is_all_day;
        query.search = self
            .search
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if let Some(date) = self.date.as_ref().filter(|d| !d.trim().is_empty()) {
            let day = parse_date(date).map_err(|_| UseCaseError::InvalidDate(date.clone()))?;
            let bounds = day_bounds(day, &ctx.config.time_zone)
                .ok_or_else(|| UseCaseError::InvalidDate(date.clone()))?;
            query.touching = Some(bounds);
        }
        if let Some(ordering) = self.ordering.as_ref().filter(|o| !o.trim().is_empty()) {
            query.order_by = ordering
                .parse::<OrderBy<EventOrderField>>()
                .map_err(|_| UseCaseError::InvalidOrdering(ordering.clone()))?;
        }
        Ok(query)
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = (Vec<Event>, Vec<Reminder>);

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let query = self.query(ctx)?;
        let events = ctx
            .repos
            .events
            .find_by_user(&query)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let event_ids = events.iter().map(|e| e.id).collect::<Vec<_>>();
        let reminders = ctx
            .repos
            .reminders
            .find_by_events(&event_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok((events, reminders))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::CreateEventUseCase;
    use crate::shared::testing::{insert_user, setup, TestContext};
    use agenda_domain::Tz;
    use chrono::{prelude::*, Duration};

    async fn create(ctx: &AgendaContext, user: &User, title: &str, start: DateTime<Utc>) -> Event {
        CreateEventUseCase {
            user: user.clone(),
            title: title.into(),
            description: String::new(),
            location: String::new(),
            start,
            end: start + Duration::hours(1),
            is_all_day: false,
            reminders: vec![],
        }
        .execute(ctx)
        .await
        .unwrap()
        .0
    }

    fn titles(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    #[actix_web::test]
    async fn lists_own_events_with_reminders() {
        let TestContext { ctx, user, .. } = setup().await;
        let start = Utc.with_ymd_and_hms(2025, 10, 8, 14, 0, 0).unwrap();
        create(&ctx, &user, "Later", start + Duration::hours(3)).await;
        create(&ctx, &user, "Sooner", start).await;
        let other = insert_user(&ctx, "bob").await;
        create(&ctx, &other, "Not mine", start).await;

        let mut usecase = GetEventsUseCase::new(user);
        let (events, reminders) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(titles(&events), vec!["Sooner", "Later"]);
        assert_eq!(reminders.len(), 2);

        usecase.ordering = Some("-start".into());
        let (events, _) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(titles(&events), vec!["Later", "Sooner"]);

        usecase.ordering = Some("location".into());
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidOrdering("location".into())
        );
    }

    #[actix_web::test]
    async fn filters_by_day_in_configured_time_zone() {
        let TestContext { mut ctx, user, .. } = setup().await;
        ctx.config.time_zone = Tz::America__Sao_Paulo;
        // 2025-10-08 23:30 in Sao Paulo
        let late = Utc.with_ymd_and_hms(2025, 10, 9, 2, 30, 0).unwrap();
        create(&ctx, &user, "Late", late).await;
        create(&ctx, &user, "Next day", late + Duration::hours(12)).await;

        let mut usecase = GetEventsUseCase::new(user);
        usecase.date = Some("2025-10-08".into());
        let (events, _) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(titles(&events), vec!["Late"]);

        usecase.date = Some("2025-13-45".into());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidDate(_))
        ));
    }
}
