use super::has_conflict;
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::create_reminder::*;
use agenda_domain::{
    Reminder, ReminderChannel, ReminderValidationError, User, DEFAULT_MINUTES_BEFORE, ID,
};
use agenda_infra::AgendaContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        user,
        event_id: body.event,
        minutes_before: body.minutes_before.unwrap_or(DEFAULT_MINUTES_BEFORE),
        channel: body.channel.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user: User,
    pub event_id: ID,
    pub minutes_before: i64,
    pub channel: ReminderChannel,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EventNotFound(ID),
    NotEventOwner(ID),
    InvalidReminder(ReminderValidationError),
    Duplicate,
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::NotEventOwner(event_id) => Self::Forbidden(format!(
                "You can not add reminders to the event with id: {}.",
                event_id
            )),
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::Duplicate => Self::Conflict(
                "The event already has a reminder with the same lead time and channel.".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let event = ctx
            .repos
            .events
            .find(&self.event_id)
            .await
            .ok_or(UseCaseError::EventNotFound(self.event_id))?;
        if event.user_id != self.user.id {
            return Err(UseCaseError::NotEventOwner(event.id));
        }

        let reminder = Reminder::new(&event, self.minutes_before, self.channel)
            .map_err(UseCaseError::InvalidReminder)?;
        if has_conflict(&reminder, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?
        {
            return Err(UseCaseError::Duplicate);
        }

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::CreateEventUseCase;
    use crate::shared::testing::{insert_user, setup, TestContext};
    use agenda_domain::Event;
    use chrono::{prelude::*, Duration};

    async fn create_event(ctx: &AgendaContext, user: &User) -> Event {
        let start = Utc.with_ymd_and_hms(2025, 10, 8, 14, 0, 0).unwrap();
        CreateEventUseCase {
            user: user.clone(),
            title: "Review".into(),
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

    fn usecase(user: User, event_id: ID, minutes_before: i64) -> CreateReminderUseCase {
        CreateReminderUseCase {
            user,
            event_id,
            minutes_before,
            channel: ReminderChannel::Email,
        }
    }

    #[actix_web::test]
    async fn creates_reminder() {
        let TestContext { ctx, user, .. } = setup().await;
        let event = create_event(&ctx, &user).await;

        let reminder = usecase(user, event.id, 60).execute(&ctx).await.unwrap();

        assert_eq!(reminder.scheduled_for(), event.start - Duration::hours(1));
        assert!(!reminder.is_sent);
        assert_eq!(ctx.repos.reminders.find(&reminder.id).await, Some(reminder));
    }

    #[actix_web::test]
    async fn rejects_duplicates_and_foreign_events() {
        let TestContext { ctx, user, .. } = setup().await;
        let event = create_event(&ctx, &user).await;

        // The default reminder already fires 15 minutes before
        assert_eq!(
            usecase(user.clone(), event.id, 15)
                .execute(&ctx)
                .await
                .unwrap_err(),
            UseCaseError::Duplicate
        );

        let other = insert_user(&ctx, "bob").await;
        assert_eq!(
            usecase(other, event.id, 30).execute(&ctx).await.unwrap_err(),
            UseCaseError::NotEventOwner(event.id)
        );

        let missing = ID::default();
        assert_eq!(
            usecase(user.clone(), missing, 30)
                .execute(&ctx)
                .await
                .unwrap_err(),
            UseCaseError::EventNotFound(missing)
        );

        assert!(matches!(
            usecase(user, event.id, -5).execute(&ctx).await,
            Err(UseCaseError::InvalidReminder(_))
        ));
    }
}
