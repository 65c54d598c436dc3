use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::get_notifications::*;
use agenda_domain::{NotificationLog, User};
use agenda_infra::{AgendaContext, NotificationLogOrderField, OrderBy};

pub async fn get_notifications_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetNotificationsUseCase {
        user,
        ordering: query_params.0.ordering,
    };

    execute(usecase, &ctx)
        .await
        .map(|logs| HttpResponse::Ok().json(APIResponse::new(logs)))
        .map_err(AgendaError::from)
}

#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub user: User,
    pub ordering: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidOrdering(String),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidOrdering(ordering) => Self::BadClientData(format!(
                "Notifications can not be ordered by: {}. Use createdAt.",
                ordering
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<NotificationLog>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let order_by = match self.ordering.as_ref().filter(|o| !o.trim().is_empty()) {
            Some(ordering) => ordering
                .parse::<OrderBy<NotificationLogOrderField>>()
                .map_err(|_| UseCaseError::InvalidOrdering(ordering.clone()))?,
            None => Default::default(),
        };

        ctx.repos
            .notification_logs
            .find_by_user(&self.user.id, order_by)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
