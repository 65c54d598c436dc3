use agenda_domain::{Reminder, ReminderChannel, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub event: ID,
    pub minutes_before: i64,
    pub channel: ReminderChannel,
    pub scheduled_for: DateTime<Utc>,
    pub is_sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            event: reminder.event_id,
            minutes_before: reminder.minutes_before,
            channel: reminder.channel,
            scheduled_for: reminder.scheduled_for(),
            is_sent: reminder.is_sent,
            sent_at: reminder.sent_at,
        }
    }
}

/// A `Reminder` given together with its `Event`
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderInputDTO {
    /// Defaults to 15 minutes
    #[serde(default)]
    pub minutes_before: Option<i64>,
    /// Defaults to email
    #[serde(default)]
    pub channel: Option<ReminderChannel>,
}
