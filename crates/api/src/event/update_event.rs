use super::{find_user_event, reminders_from_input, ReminderInputError};
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::dtos::ReminderInputDTO;
use agenda_api_structs::update_event::*;
use agenda_domain::{Event, EventValidationError, Reminder, User, ID};
use agenda_infra::AgendaContext;
use chrono::{DateTime, Utc};

pub async fn update_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateEventUseCase {
        user,
        event_id: path_params.event_id,
        title: body.title,
        description: body.description,
        location: body.location,
        start: body.start,
        end: body.end,
        is_all_day: body.is_all_day,
        reminders: body.reminders,
    };

    execute(usecase, &ctx)
        .await
        .map(|(event, reminders)| HttpResponse::Ok().json(APIResponse::new(event, reminders)))
        .map_err(AgendaError::from)
}

/// Partial update, only the given fields are changed
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub user: User,
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub is_all_day: Option<bool>,
    /// Replaces all the `Reminder`s of the `Event` when given
    pub reminders: Option<Vec<ReminderInputDTO>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidEvent(EventValidationError),
    InvalidReminder(ReminderInputError),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
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
impl UseCase for UpdateEventUseCase {
    type Response = (Event, Vec<Reminder>);

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let mut e = find_user_event(&self.event_id, &self.user, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))?;
        let previous_start = e.start;

        if let Some(title) = &self.title {
            e.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            e.description = description.clone();
        }
        if let Some(location) = &self.location {
            e.location = location.trim().to_string();
        }
        if let Some(start) = self.start {
            e.start = start;
        }
        if let Some(end) = self.end {
            e.end = end;
        }
        if let Some(is_all_day) = self.is_all_day {
            e.is_all_day = is_all_day;
        }
        e.updated = ctx.sys.now();
        e.prepare_save(&ctx.config.time_zone)
            .map_err(UseCaseError::InvalidEvent)?;

        let replace_reminders = self.reminders.is_some();
        let reminders = match &self.reminders {
            Some(inputs) => {
                reminders_from_input(&e, inputs, false).map_err(UseCaseError::InvalidReminder)?
            }
            None => {
                let mut reminders = ctx
                    .repos
                    .reminders
                    .find_by_event(&e.id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                for reminder in reminders.iter_mut() {
                    reminder.reschedule(&e).map_err(|err| {
                        UseCaseError::InvalidReminder(ReminderInputError::Invalid(err))
                    })?;
                }
                reminders
            }
        };

        ctx.repos
            .events
            .save(&e)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if replace_reminders {
            ctx.repos
                .reminders
                .delete_by_event(&e.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            for reminder in &reminders {
                ctx.repos
                    .reminders
                    .insert(reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
        } else if e.start != previous_start {
            for reminder in &reminders {
                ctx.repos
                    .reminders
                    .save(reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
        }

        Ok((e, reminders))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::CreateEventUseCase;
    use crate::shared::testing::{insert_user, setup, TestContext};
    use chrono::{prelude::*, Duration};

    fn update(user: User, event_id: ID) -> UpdateEventUseCase {
        UpdateEventUseCase {
            user,
            event_id,
            title: None,
            description: None,
            location: None,
            start: None,
            end: None,
            is_all_day: None,
            reminders: None,
        }
    }

    async fn create(ctx: &AgendaContext, user: &User) -> (Event, Vec<Reminder>) {
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
    }

    #[actix_web::test]
    async fn reschedules_reminders_when_start_moves() {
        let TestContext { ctx, user, .. } = setup().await;
        let (event, _) = create(&ctx, &user).await;

        let new_start = event.start + Duration::days(1);
        let mut usecase = update(user, event.id);
        usecase.start = Some(new_start);
        usecase.end = Some(new_start + Duration::hours(1));
        let (updated, reminders) = usecase.execute(&ctx).await.unwrap();

        assert_eq!(updated.start, new_start);
        assert_eq!(updated.title, "Review");
        assert_eq!(reminders[0].scheduled_for(), new_start - Duration::minutes(15));
        let stored = ctx.repos.reminders.find(&reminders[0].id).await.unwrap();
        assert_eq!(stored.scheduled_for(), new_start - Duration::minutes(15));
    }

    #[actix_web::test]
    async fn replaces_reminders_when_given() {
        let TestContext { ctx, user, .. } = setup().await;
        let (event, old_reminders) = create(&ctx, &user).await;

        let mut usecase = update(user, event.id);
        usecase.reminders = Some(vec![ReminderInputDTO {
            minutes_before: Some(120),
            channel: None,
        }]);
        let (_, reminders) = usecase.execute(&ctx).await.unwrap();

        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].minutes_before, 120);
        assert!(ctx.repos.reminders.find(&old_reminders[0].id).await.is_none());
        assert_eq!(
            ctx.repos.reminders.find_by_event(&event.id).await.unwrap(),
            reminders
        );
    }

    #[actix_web::test]
    async fn rejects_invalid_updates() {
        let TestContext { ctx, user, .. } = setup().await;
        let (event, _) = create(&ctx, &user).await;

        let mut usecase = update(user.clone(), event.id);
        usecase.end = Some(event.start - Duration::hours(1));
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidEvent(EventValidationError::EndBeforeStart)
        );
        assert_eq!(ctx.repos.events.find(&event.id).await, Some(event.clone()));

        let other = insert_user(&ctx, "bob").await;
        let mut usecase = update(other, event.id);
        usecase.title = Some("Hijacked".into());
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(event.id)
        );
    }
}
