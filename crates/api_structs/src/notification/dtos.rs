use agenda_domain::{NotificationLog, NotificationStatus, ReminderChannel, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationLogDTO {
    pub id: ID,
    pub event: ID,
    /// Unset when the `Reminder` has been deleted
    pub reminder: Option<ID>,
    pub user: ID,
    pub channel: ReminderChannel,
    pub status: NotificationStatus,
    pub error_message: String,
    pub created_at: DateTime<Utc>,
}

impl NotificationLogDTO {
    pub fn new(log: NotificationLog) -> Self {
        Self {
            id: log.id,
            event: log.event_id,
            reminder: log.reminder_id,
            user: log.user_id,
            channel: log.channel,
            status: log.status,
            error_message: log.error_message,
            created_at: log.created,
        }
    }
}
