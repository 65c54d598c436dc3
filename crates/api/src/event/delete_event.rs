use super::find_user_event;
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::delete_event::*;
use agenda_domain::{Event, User, ID};
use agenda_infra::AgendaContext;

pub async fn delete_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteEventUseCase {
        user,
        event_id: path_params.event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event, vec![])))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub user: User,
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteEventUseCase {
    type Response = Event;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    /// Reminders and notification logs of the event are deleted with it
    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let event = find_user_event(&self.event_id, &self.user, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))?;

        ctx.repos
            .events
            .delete(&event.id)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::CreateEventUseCase;
    use crate::shared::testing::{insert_user, setup, TestContext};
    use chrono::{Duration, Utc};

    #[actix_web::test]
    async fn deletes_own_event_with_reminders() {
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

        let other = insert_user(&ctx, "bob").await;
        let res = DeleteEventUseCase {
            user: other,
            event_id: event.id,
        }
        .execute(&ctx)
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(event.id));

        let deleted = DeleteEventUseCase {
            user,
            event_id: event.id,
        }
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(deleted.id, event.id);
        assert!(ctx.repos.events.find(&event.id).await.is_none());
        assert!(ctx.repos.reminders.find(&reminders[0].id).await.is_none());
    }
}
