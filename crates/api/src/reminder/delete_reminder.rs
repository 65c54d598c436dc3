use super::find_user_reminder;
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::delete_reminder::*;
use agenda_domain::{Reminder, User, ID};
use agenda_infra::AgendaContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        user,
        reminder_id: path_params.reminder_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user: User,
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let reminder = find_user_reminder(&self.reminder_id, &self.user, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.reminder_id))?;

        ctx.repos
            .reminders
            .delete(&reminder.id)
            .await
            .ok_or(UseCaseError::NotFound(self.reminder_id))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::CreateEventUseCase;
    use crate::shared::testing::{insert_user, setup, TestContext};
    use chrono::{Duration, Utc};

    #[actix_web::test]
    async fn deletes_only_own_reminders() {
        let TestContext { ctx, user, .. } = setup().await;
        let start = Utc::now();
        let (event, reminders) = CreateEventUseCase {
            user: user.clone(),
            title: "Review".into(),
            description: String::new(),
            location: String::new(),
            start,
            end: start + Duration::hours(1),
            is_all_day: false,
            reminders: vec![],
        }
        .execute(&ctx)
        .await
        .unwrap();
        let reminder_id = reminders[0].id;

        let other = insert_user(&ctx, "bob").await;
        let res = DeleteReminderUseCase {
            user: other,
            reminder_id,
        }
        .execute(&ctx)
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(reminder_id));

        let deleted = DeleteReminderUseCase { user, reminder_id }
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(deleted.id, reminder_id);
        assert!(ctx.repos.reminders.find(&reminder_id).await.is_none());
        assert!(ctx.repos.events.find(&event.id).await.is_some());
    }
}
