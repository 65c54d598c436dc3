use crate::error::AgendaError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_api_structs::signup::*;
use agenda_domain::{User, UserValidationError};
use agenda_infra::AgendaContext;
use agenda_utils::create_api_token;

pub async fn signup_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let body = body.0;
    let usecase = SignupUseCase {
        username: body.username,
        email: body.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(AgendaError::from)
}

/// Creates a `User` together with its api token
#[derive(Debug)]
pub struct SignupUseCase {
    pub username: String,
    pub email: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidUser(UserValidationError),
    UsernameTaken(String),
    EmailTaken(String),
    StorageError,
}

impl From<UseCaseError> for AgendaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidUser(e) => Self::BadClientData(e.to_string()),
            UseCaseError::UsernameTaken(username) => Self::Conflict(format!(
                "A user with the username: {}, already exists.",
                username
            )),
            UseCaseError::EmailTaken(email) => Self::Conflict(format!(
                "A user with the email: {}, already exists.",
                email
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignupUseCase {
    type Response = User;

    type Error = UseCaseError;

    const NAME: &'static str = "Signup";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let mut user = User::new(&self.username, &self.email, create_api_token())
            .map_err(UseCaseError::InvalidUser)?;
        user.created = ctx.sys.now();

        if ctx.repos.users.find_by_username(&user.username).await.is_some() {
            return Err(UseCaseError::UsernameTaken(user.username));
        }
        if ctx.repos.users.find_by_email(&user.email).await.is_some() {
            return Err(UseCaseError::EmailTaken(user.email));
        }

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user)
    }
}
