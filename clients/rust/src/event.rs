use crate::{APIResponse, BaseClient};
use agenda_api_structs::dtos::ReminderInputDTO;
use agenda_api_structs::*;
use agenda_domain::ID;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventClient {
    base: Arc<BaseClient>,
}

pub struct CreateEventInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_all_day: Option<bool>,
    /// The server adds a 15 minute email reminder when `None`
    pub reminders: Option<Vec<ReminderInputDTO>>,
}

#[derive(Default)]
pub struct GetEventsInput {
    pub start_after: Option<DateTime<Utc>>,
    pub end_before: Option<DateTime<Utc>>,
    pub date: Option<String>,
    pub is_all_day: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

pub struct UpdateEventInput {
    pub event_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub is_all_day: Option<bool>,
    pub reminders: Option<Vec<ReminderInputDTO>>,
}

impl EventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        let body = create_event::RequestBody {
            title: input.title,
            description: input.description,
            location: input.location,
            start: input.start,
            end: input.end,
            is_all_day: input.is_all_day,
            reminders: input.reminders,
        };

        self.base
            .post(body, "events".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, event_id: ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn list(&self, input: GetEventsInput) -> APIResponse<get_events::APIResponse> {
        let query = get_events::QueryParams {
            start_after: input.start_after,
            end_before: input.end_before,
            date: input.date,
            is_all_day: input.is_all_day,
            search: input.search,
            ordering: input.ordering,
        };

        self.base
            .get_with_query("events".into(), &query, StatusCode::OK)
            .await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        let body = update_event::RequestBody {
            title: input.title,
            description: input.description,
            location: input.location,
            start: input.start,
            end: input.end,
            is_all_day: input.is_all_day,
            reminders: input.reminders,
        };

        self.base
            .put(body, format!("events/{}", input.event_id), StatusCode::OK)
            .await
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<delete_event::APIResponse> {
        self.base
            .delete(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    /// The event as an iCalendar document
    pub async fn export_ics(&self, event_id: ID) -> APIResponse<String> {
        self.base
            .get_text(format!("events/{}/export/ics", event_id), StatusCode::OK)
            .await
    }
}
