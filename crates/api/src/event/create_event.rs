use super::{reminders_from_input, ReminderInputError};
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::create_event::*;
use agenda_api_structs::dtos::ReminderInputDTO;
use agenda_domain::{Event, EventValidationError, Reminder, User};
use agenda_infra::AgendaContext;
use chrono::{DateTime, Utc};

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateEventUseCase {
        user,
        title: body.title,
        description: body.description.unwrap_or_default(),
        location: body.location.unwrap_or_default(),
        start: body.start,
        end: body.end,
        is_all_day: body.is_all_day.unwrap_or(false),
        reminders: body.reminders.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|(event, reminders)| HttpResponse::Created().json(APIResponse::new(event, reminders)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub user: User,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_all_day: bool,
    /// The default reminder is created when empty
    pub reminders: Vec<ReminderInputDTO>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidEvent(EventValidationError),
    InvalidReminder(ReminderInputError),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEvent(e) => Self::BadClientData(e.to_string()),
            UseCaseError::InvalidReminder(ReminderInputError::Invalid(e)) => {
                Self::BadClientData(e.to_string())
            }
            UseCaseError::InvalidReminder(ReminderInputError::Duplicate) => {
                Self::BadClientData("The same reminder was given more than once".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = (Event, Vec<Reminder>);

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let mut e = Event::new(self.user.id, self.title.trim().to_string(), self.start, self.end);
        e.description = self.description.clone();
        e.location = self.location.trim().to_string();
        e.is_all_day = self.is_all_day;
        e.created = now;
        e.updated = now;
        e.prepare_save(&ctx.config.time_zone)
            .map_err(UseCaseError::InvalidEvent)?;

        let reminders = reminders_from_input(&e, &self.reminders, true)
            .map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .events
            .insert(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        for reminder in &reminders {
            ctx.repos
                .reminders
                .insert(reminder)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok((e, reminders))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::testing::{setup, TestContext};
    use agenda_domain::EventValidationError;
    use chrono::{prelude::*, Duration};

    fn usecase(user: User) -> CreateEventUseCase {
        let start = Utc.with_ymd_and_hms(2025, 10, 8, 14, 0, 0).unwrap();
        CreateEventUseCase {
            user,
            title: "Sprint review".into(),
            description: String::new(),
            location: "Room 1".into(),
            start,
            end: start + Duration::hours(1),
            is_all_day: false,
            reminders: vec![],
        }
    }

    #[actix_web::test]
    async fn creates_event_with_default_reminder() {
        let TestContext { ctx, user, .. } = setup().await;

        let (event, reminders) = usecase(user).execute(&ctx).await.unwrap();

        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].minutes_before, 15);
        assert!(ctx.repos.events.find(&event.id).await.is_some());
        assert_eq!(
            ctx.repos.reminders.find_by_event(&event.id).await.unwrap(),
            reminders
        );
    }

    #[actix_web::test]
    async fn creates_given_reminders() {
        let TestContext { ctx, user, .. } = setup().await;
        let mut usecase = usecase(user);
        usecase.reminders = vec![
            ReminderInputDTO {
                minutes_before: Some(60),
                channel: None,
            },
            ReminderInputDTO {
                minutes_before: Some(0),
                channel: None,
            },
        ];

        let (event, reminders) = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[1].scheduled_for(), event.start);
    }

    #[actix_web::test]
    async fn normalizes_all_day_events() {
        let TestContext { ctx, user, .. } = setup().await;
        let mut usecase = usecase(user);
        usecase.is_all_day = true;

        let (event, _) = usecase.execute(&ctx).await.unwrap();

        assert_eq!(
            event.start,
            Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap()
        );
        assert_eq!(
            event.end,
            Utc.with_ymd_and_hms(2025, 10, 8, 23, 59, 59).unwrap()
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_events() {
        let TestContext { ctx, user, .. } = setup().await;

        let mut invalid = usecase(user.clone());
        invalid.end = invalid.start - Duration::minutes(1);
        assert_eq!(
            invalid.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::EndBeforeStart)
        );

        let mut invalid = usecase(user);
        invalid.title = "   ".into();
        assert_eq!(
            invalid.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::EmptyTitle)
        );
    }
}
