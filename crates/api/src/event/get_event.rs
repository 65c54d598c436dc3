use super::find_user_event;
use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::get_event::*;
use agenda_domain::{Event, Reminder, User, ID};
use agenda_infra::AgendaContext;

pub async fn get_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetEventUseCase {
        user,
        event_id: path_params.event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|(event, reminders)| HttpResponse::Ok().json(APIResponse::new(event, reminders)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct GetEventUseCase {
    pub user: User,
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventUseCase {
    type Response = (Event, Vec<Reminder>);

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let event = find_user_event(&self.event_id, &self.user, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))?;
        let reminders = ctx
            .repos
            .reminders
            .find_by_event(&event.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        Ok((event, reminders))
    }
}
