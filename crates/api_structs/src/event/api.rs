use crate::dtos::{EventDTO, ReminderInputDTO};
use agenda_domain::{Event, Reminder, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event: EventDTO,
}

impl EventResponse {
    pub fn new(event: Event, reminders: Vec<Reminder>) -> Self {
        Self {
            event: EventDTO::new(event, reminders),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        pub start: DateTime<Utc>,
        pub end: DateTime<Utc>,
        #[serde(default)]
        pub is_all_day: Option<bool>,
        /// A default reminder is created when not given
        #[serde(default)]
        pub reminders: Option<Vec<ReminderInputDTO>>,
    }

    pub type APIResponse = EventResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod get_events {
    use super::*;

    #[derive(Serialize, Deserialize, Debug, Default, Clone)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub start_after: Option<DateTime<Utc>>,
        pub end_before: Option<DateTime<Utc>>,
        /// `YYYY-MM-DD`, events touching that day
        pub date: Option<String>,
        pub is_all_day: Option<bool>,
        pub search: Option<String>,
        /// `start`, `end` or `title`, prefixed with `-` for descending
        pub ordering: Option<String>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<EventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<Event>, reminders: Vec<Reminder>) -> Self {
            Self {
                events: events
                    .into_iter()
                    .map(|e| EventDTO::new(e, reminders.clone()))
                    .collect(),
            }
        }
    }
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize, Debug, Clone, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub start: Option<DateTime<Utc>>,
        #[serde(default)]
        pub end: Option<DateTime<Utc>>,
        #[serde(default)]
        pub is_all_day: Option<bool>,
        /// Replaces all the current reminders when given
        #[serde(default)]
        pub reminders: Option<Vec<ReminderInputDTO>>,
    }

    pub type APIResponse = EventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = EventResponse;
}

pub mod export_event_ics {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_defaults_optional_create_fields() {
        let body: create_event::RequestBody = serde_json::from_str(
            r#"{"title": "Review", "start": "2025-10-08T14:00:00Z", "end": "2025-10-08T15:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(body.title, "Review");
        assert!(body.reminders.is_none());
        assert!(body.is_all_day.is_none());

        let body: create_event::RequestBody = serde_json::from_str(
            r#"{"title": "Review", "start": "2025-10-08T14:00:00Z", "end": "2025-10-08T15:00:00Z",
                "isAllDay": true, "reminders": [{"minutesBefore": 30}, {}]}"#,
        )
        .unwrap();
        assert_eq!(body.is_all_day, Some(true));
        let reminders = body.reminders.unwrap();
        assert_eq!(reminders[0].minutes_before, Some(30));
        assert_eq!(reminders[1], ReminderInputDTO::default());
    }

    #[test]
    fn it_serializes_events_with_their_reminders() {
        let start = "2025-10-08T14:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let event = Event::new(ID::default(), "Review".into(), start, start);
        let other = Event::new(ID::default(), "Other".into(), start, start);
        let reminders = vec![
            Reminder::new(&event, 15, Default::default()).unwrap(),
            Reminder::new(&other, 15, Default::default()).unwrap(),
        ];
        let json = serde_json::to_value(EventResponse::new(event, reminders)).unwrap();
        assert_eq!(json["event"]["title"], "Review");
        assert_eq!(json["event"]["isAllDay"], false);
        assert_eq!(json["event"]["reminders"].as_array().unwrap().len(), 1);
        assert_eq!(json["event"]["reminders"][0]["minutesBefore"], 15);
        assert_eq!(json["event"]["reminders"][0]["channel"], "email");
        assert_eq!(
            json["event"]["reminders"][0]["scheduledFor"],
            "2025-10-08T13:45:00Z"
        );
    }
}
