use crate::{APIResponse, BaseClient};
use agenda_api_structs::*;
use agenda_domain::{ReminderChannel, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub event_id: ID,
    pub minutes_before: Option<i64>,
    pub channel: Option<ReminderChannel>,
}

pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub event_id: Option<ID>,
    pub minutes_before: Option<i64>,
    pub channel: Option<ReminderChannel>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            event: input.event_id,
            minutes_before: input.minutes_before,
            channel: input.channel,
        };

        self.base
            .post(body, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self, ordering: Option<String>) -> APIResponse<get_reminders::APIResponse> {
        let query = get_reminders::QueryParams { ordering };
        self.base
            .get_with_query("reminders".into(), &query, StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            event: input.event_id,
            minutes_before: input.minutes_before,
            channel: input.channel,
        };

        self.base
            .put(
                body,
                format!("reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
