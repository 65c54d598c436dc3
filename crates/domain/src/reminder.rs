use crate::shared::entity::{Entity, ID};
use crate::Event;
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const DEFAULT_MINUTES_BEFORE: i64 = 15;
pub const MAX_MINUTES_BEFORE: i64 = i32::MAX as i64;

/// How a `Reminder` reaches the owner of the `Event`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderChannel {
    Email,
}

impl Default for ReminderChannel {
    fn default() -> Self {
        Self::Email
    }
}

impl ReminderChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
        }
    }
}

impl Display for ReminderChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderChannel {
    type Err = ReminderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            other => Err(ReminderValidationError::UnknownChannel(other.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderValidationError {
    #[error("Minutes before must be between 0 and {0}")]
    InvalidMinutesBefore(i64),
    #[error("Unknown reminder channel: {0}")]
    UnknownChannel(String),
    #[error("The reminder fire time is out of range")]
    OutOfRange,
}

/// A `Reminder` represents a specific time before the start of an
/// `Event` at which the owner should be notified.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `Event` this `Reminder` is associated with
    pub event_id: ID,
    pub minutes_before: i64,
    pub channel: ReminderChannel,
    /// Always `event.start - minutes_before`. Only set through
    /// `Reminder::new` and `Reminder::reschedule`.
    scheduled_for: DateTime<Utc>,
    pub is_sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Reminder {
    pub fn new(
        event: &Event,
        minutes_before: i64,
        channel: ReminderChannel,
    ) -> Result<Self, ReminderValidationError> {
        let scheduled_for = Self::compute_scheduled_for(&event.start, minutes_before)?;
        Ok(Self {
            id: Default::default(),
            event_id: event.id,
            minutes_before,
            channel,
            scheduled_for,
            is_sent: false,
            sent_at: None,
        })
    }

    /// Rebuilds a `Reminder` read back from storage
    pub fn restore(
        id: ID,
        event_id: ID,
        minutes_before: i64,
        channel: ReminderChannel,
        scheduled_for: DateTime<Utc>,
        is_sent: bool,
        sent_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            event_id,
            minutes_before,
            channel,
            scheduled_for,
            is_sent,
            sent_at,
        }
    }

    pub fn compute_scheduled_for(
        event_start: &DateTime<Utc>,
        minutes_before: i64,
    ) -> Result<DateTime<Utc>, ReminderValidationError> {
        if !(0..=MAX_MINUTES_BEFORE).contains(&minutes_before) {
            return Err(ReminderValidationError::InvalidMinutesBefore(
                MAX_MINUTES_BEFORE,
            ));
        }
        event_start
            .checked_sub_signed(Duration::minutes(minutes_before))
            .ok_or(ReminderValidationError::OutOfRange)
    }

    pub fn scheduled_for(&self) -> DateTime<Utc> {
        self.scheduled_for
    }

    /// Recomputes the fire time from the start of the owning `Event`.
    /// Has to be called on every save.
    pub fn reschedule(&mut self, event: &Event) -> Result<(), ReminderValidationError> {
        self.scheduled_for = Self::compute_scheduled_for(&event.start, self.minutes_before)?;
        self.event_id = event.id;
        Ok(())
    }

    pub fn is_due(&self, now: &DateTime<Utc>) -> bool {
        !self.is_sent && self.scheduled_for <= *now
    }

    pub fn mark_sent(&mut self, sent_at: DateTime<Utc>) {
        self.is_sent = true;
        self.sent_at = Some(sent_at);
    }

    /// Two `Reminder`s conflict when they would fire for the same event,
    /// lead time and channel
    pub fn conflicts_with(&self, other: &Reminder) -> bool {
        self.id != other.id
            && self.event_id == other.event_id
            && self.minutes_before == other.minutes_before
            && self.channel == other.channel
    }
}
