use crate::{APIResponse, BaseClient};
use agenda_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn signup(&self, username: &str, email: &str) -> APIResponse<signup::APIResponse> {
        let body = signup::RequestBody {
            username: username.into(),
            email: email.into(),
        };
        self.base
            .post(body, "auth/signup".into(), StatusCode::CREATED)
            .await
    }

    pub async fn me(&self) -> APIResponse<get_me::APIResponse> {
        self.base.get("auth/me".into(), StatusCode::OK).await
    }
}
