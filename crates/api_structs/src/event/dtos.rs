use crate::dtos::ReminderDTO;
use agenda_domain::{Event, Reminder, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_all_day: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub reminders: Vec<ReminderDTO>,
}

impl EventDTO {
    /// Only the `Reminder`s belonging to the `Event` are kept
    pub fn new(event: Event, reminders: Vec<Reminder>) -> Self {
        let reminders = reminders
            .into_iter()
            .filter(|r| r.event_id == event.id)
            .map(ReminderDTO::new)
            .collect();
        Self {
            id: event.id,
            user_id: event.user_id,
            title: event.title,
            description: event.description,
            location: event.location,
            start: event.start,
            end: event.end,
            is_all_day: event.is_all_day,
            created: event.created,
            updated: event.updated,
            reminders,
        }
    }
}
