use crate::{APIResponse, BaseClient};
use agenda_api_structs::*;
use agenda_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

/// Read only access to the delivery log of the reminders
#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self, notification_id: ID) -> APIResponse<get_notification::APIResponse> {
        self.base
            .get(format!("notifications/{}", notification_id), StatusCode::OK)
            .await
    }

    pub async fn list(
        &self,
        ordering: Option<String>,
    ) -> APIResponse<get_notifications::APIResponse> {
        let query = get_notifications::QueryParams { ordering };
        self.base
            .get_with_query("notifications".into(), &query, StatusCode::OK)
            .await
    }
}
