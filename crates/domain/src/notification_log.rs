use crate::shared::entity::{Entity, ID};
use crate::{Event, Reminder, ReminderChannel};
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            other => Err(anyhow::Error::msg(format!(
                "Unknown notification status: {}",
                other
            ))),
        }
    }
}

/// Append only record of an attempt to deliver a `Reminder`
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationLog {
    pub id: ID,
    pub event_id: ID,
    /// Cleared when the `Reminder` is deleted
    pub reminder_id: Option<ID>,
    pub user_id: ID,
    pub channel: ReminderChannel,
    pub status: NotificationStatus,
    /// Empty unless `status` is `Failed`
    pub error_message: String,
    pub created: DateTime<Utc>,
}

impl Entity for NotificationLog {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl NotificationLog {
    pub fn sent(event: &Event, reminder: &Reminder, created: DateTime<Utc>) -> Self {
        Self::new(event, reminder, NotificationStatus::Sent, String::new(), created)
    }

    pub fn failed(
        event: &Event,
        reminder: &Reminder,
        error_message: String,
        created: DateTime<Utc>,
    ) -> Self {
        Self::new(event, reminder, NotificationStatus::Failed, error_message, created)
    }

    fn new(
        event: &Event,
        reminder: &Reminder,
        status: NotificationStatus,
        error_message: String,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            event_id: event.id,
            reminder_id: Some(reminder.id),
            user_id: event.user_id,
            channel: reminder.channel,
            status,
            error_message,
            created,
        }
    }
}
