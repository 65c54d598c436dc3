use super::{find_user_reminder, has_conflict};
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::update_reminder::*;
use agenda_domain::{Reminder, ReminderChannel, ReminderValidationError, User, ID};
use agenda_infra::AgendaContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        user,
        reminder_id: path_params.reminder_id,
        event_id: body.event,
        minutes_before: body.minutes_before,
        channel: body.channel,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub user: User,
    pub reminder_id: ID,
    pub event_id: Option<ID>,
    pub minutes_before: Option<i64>,
    pub channel: Option<ReminderChannel>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    EventNotFound(ID),
    NotEventOwner(ID),
    InvalidReminder(ReminderValidationError),
    Duplicate,
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::EventNotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::NotEventOwner(event_id) => Self::Forbidden(format!(
                "You can not move reminders to the event with id: {}.",
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
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    /// `scheduled_for` is recomputed from the (possibly new) event, the
    /// sent state is left untouched
    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = find_user_reminder(&self.reminder_id, &self.user, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.reminder_id))?;

        let event_id = self.event_id.unwrap_or(reminder.event_id);
        let event = ctx
            .repos
            .events
            .find(&event_id)
            .await
            .ok_or(UseCaseError::EventNotFound(event_id))?;
        if event.user_id != self.user.id {
            return Err(UseCaseError::NotEventOwner(event.id));
        }

        if let Some(minutes_before) = self.minutes_before {
            reminder.minutes_before = minutes_before;
        }
        if let Some(channel) = self.channel {
            reminder.channel = channel;
        }
        reminder
            .reschedule(&event)
            .map_err(UseCaseError::InvalidReminder)?;

        if has_conflict(&reminder, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?
        {
            return Err(UseCaseError::Duplicate);
        }

        ctx.repos
            .reminders
            .save(&reminder)
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
    use agenda_api_structs::dtos::ReminderInputDTO;
    use agenda_domain::Event;
    use chrono::{prelude::*, Duration};

    async fn create_event(
        ctx: &AgendaContext,
        user: &User,
        start: DateTime<Utc>,
        reminders: Vec<ReminderInputDTO>,
    ) -> (Event, Vec<Reminder>) {
        CreateEventUseCase {
            user: user.clone(),
            title: "Review".into(),
            description: String::new(),
            location: String::new(),
            start,
            end: start + Duration::hours(1),
            is_all_day: false,
            reminders,
        }
        .execute(ctx)
        .await
        .unwrap()
    }

    fn usecase(user: &User, reminder: &Reminder) -> UpdateReminderUseCase {
        UpdateReminderUseCase {
            user: user.clone(),
            reminder_id: reminder.id,
            event_id: None,
            minutes_before: None,
            channel: None,
        }
    }

    #[actix_web::test]
    async fn changes_lead_time_and_event() {
        let TestContext { ctx, user, .. } = setup().await;
        let start = Utc.with_ymd_and_hms(2025, 10, 8, 14, 0, 0).unwrap();
        let (_, reminders) = create_event(&ctx, &user, start, vec![]).await;
        let (other_event, _) =
            create_event(&ctx, &user, start + Duration::days(1), vec![]).await;

        let mut uc = usecase(&user, &reminders[0]);
        uc.minutes_before = Some(60);
        let updated = uc.execute(&ctx).await.unwrap();
        assert_eq!(updated.scheduled_for(), start - Duration::hours(1));

        let mut uc = usecase(&user, &reminders[0]);
        uc.event_id = Some(other_event.id);
        let moved = uc.execute(&ctx).await.unwrap();
        assert_eq!(moved.event_id, other_event.id);
        assert_eq!(moved.minutes_before, 60);
        assert_eq!(
            moved.scheduled_for(),
            other_event.start - Duration::hours(1)
        );
        assert_eq!(ctx.repos.reminders.find(&moved.id).await, Some(moved));
    }

    #[actix_web::test]
    async fn rejects_conflicts_and_foreign_targets() {
        let TestContext { ctx, user, .. } = setup().await;
        let start = Utc.with_ymd_and_hms(2025, 10, 8, 14, 0, 0).unwrap();
        let inputs = vec![
            ReminderInputDTO {
                minutes_before: Some(10),
                channel: None,
            },
            ReminderInputDTO {
                minutes_before: Some(20),
                channel: None,
            },
        ];
        let (_, reminders) = create_event(&ctx, &user, start, inputs).await;

        let mut uc = usecase(&user, &reminders[0]);
        uc.minutes_before = Some(20);
        assert_eq!(uc.execute(&ctx).await.unwrap_err(), UseCaseError::Duplicate);

        let other = insert_user(&ctx, "bob").await;
        let (foreign_event, _) = create_event(&ctx, &other, start, vec![]).await;
        let mut uc = usecase(&user, &reminders[0]);
        uc.event_id = Some(foreign_event.id);
        assert_eq!(
            uc.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotEventOwner(foreign_event.id)
        );

        let mut uc = usecase(&other, &reminders[0]);
        assert_eq!(
            uc.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(reminders[0].id)
        );
    }
}
