use crate::date::localize;
use crate::shared::entity::{Entity, ID};
use chrono::{prelude::*, Duration};
use chrono_tz::Tz;
use thiserror::Error;

pub const EVENT_TITLE_MAX_LEN: usize = 200;
pub const EVENT_LOCATION_MAX_LEN: usize = 200;

/// A `Event` is something a `User` has planned at a given time span
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: ID,
    /// The `User` owning this `Event`
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// All day `Event`s always span from 00:00:00 on the start day to
    /// 23:59:59 on the end day
    pub is_all_day: bool,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

#[derive(Error, Debug, PartialEq)]
pub enum EventValidationError {
    #[error("The event title can not be empty")]
    EmptyTitle,
    #[error("The event title can not be longer than {0} characters")]
    TitleTooLong(usize),
    #[error("The event location can not be longer than {0} characters")]
    LocationTooLong(usize),
    #[error("The event end can not be before the event start")]
    EndBeforeStart,
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Event {
    pub fn new(user_id: ID, title: String, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Default::default(),
            user_id,
            title,
            description: String::new(),
            location: String::new(),
            start,
            end,
            is_all_day: false,
            created: now,
            updated: now,
        }
    }

    /// Expands the start and end of an all day `Event` to the bounds of
    /// their days in the given timezone. Does nothing for other events.
    pub fn normalize_all_day(&mut self, tz: &Tz) {
        if !self.is_all_day {
            return;
        }
        let start_day = self.start.with_timezone(tz).date_naive();
        let end_day = self.end.with_timezone(tz).date_naive();
        if let Some(start) = localize(start_day.and_time(NaiveTime::MIN), tz) {
            self.start = start;
        }
        if let Some(end) = end_day
            .and_hms_opt(23, 59, 59)
            .and_then(|end| localize(end, tz))
        {
            self.end = end;
        }
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.title.chars().count() > EVENT_TITLE_MAX_LEN {
            return Err(EventValidationError::TitleTooLong(EVENT_TITLE_MAX_LEN));
        }
        if self.location.chars().count() > EVENT_LOCATION_MAX_LEN {
            return Err(EventValidationError::LocationTooLong(EVENT_LOCATION_MAX_LEN));
        }
        if self.end < self.start {
            return Err(EventValidationError::EndBeforeStart);
        }
        Ok(())
    }

    /// Normalizes and validates the `Event` before it is stored
    pub fn prepare_save(&mut self, tz: &Tz) -> Result<(), EventValidationError> {
        self.normalize_all_day(tz);
        self.validate()
    }

    /// Checks if the `Event` overlaps the closed interval `[start, end]`
    pub fn touches(&self, start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool {
        self.end >= *start && self.start <= *end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
