use crate::error::AgendaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use agenda_api_structs::get_reminders::*;
use agenda_domain::{Reminder, User};
use agenda_infra::{AgendaContext, OrderBy, ReminderOrderField};

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase {
        user,
        ordering: query_params.0.ordering,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(AgendaError::from)
}

/// All the `Reminder`s of the `Event`s owned by the `User`
#[derive(Debug)]
pub struct GetRemindersUseCase {
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
                "Reminders can not be ordered by: {}. Use scheduledFor or minutesBefore.",
                ordering
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let order_by = match self.ordering.as_ref().filter(|o| !o.trim().is_empty()) {
            Some(ordering) => ordering
                .parse::<OrderBy<ReminderOrderField>>()
                .map_err(|_| UseCaseError::InvalidOrdering(ordering.clone()))?,
            None => Default::default(),
        };

        ctx.repos
            .reminders
            .find_by_user(&self.user.id, order_by)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
