use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::get_notification::*;
use agenda_domain::{NotificationLog, User, ID};
use agenda_infra::AgendaContext;

pub async fn get_notification_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetNotificationUseCase {
        user,
        notification_id: path_params.notification_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|log| HttpResponse::Ok().json(APIResponse::new(log)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct GetNotificationUseCase {
    pub user: User,
    pub notification_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found.",
                notification_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationUseCase {
    type Response = NotificationLog;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotification";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.notification_logs.find(&self.notification_id).await {
            Some(log) if log.user_id == self.user.id => Ok(log),
            _ => Err(UseCaseError::NotFound(self.notification_id)),
        }
    }
}
