use agenda_domain::ID;
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// Sorting of a listing: a field, ascending unless `descending`.
/// Parsed from strings like `start` or `-start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<F> {
    pub field: F,
    pub descending: bool,
}

impl<F> OrderBy<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOrderingError(pub String);

impl std::fmt::Display for InvalidOrderingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid ordering: {}", self.0)
    }
}

impl<F: FromStr> FromStr for OrderBy<F> {
    type Err = InvalidOrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, field) = match s.strip_prefix('-') {
            Some(field) => (true, field),
            None => (false, s),
        };
        let field = field
            .parse::<F>()
            .map_err(|_| InvalidOrderingError(s.to_string()))?;
        Ok(Self { field, descending })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrderField {
    Start,
    End,
    Title,
}

impl FromStr for EventOrderField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "title" => Ok(Self::Title),
            _ => Err(()),
        }
    }
}

impl Default for OrderBy<EventOrderField> {
    fn default() -> Self {
        Self::asc(EventOrderField::Start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOrderField {
    ScheduledFor,
    MinutesBefore,
}

impl FromStr for ReminderOrderField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduledFor" | "scheduled_for" => Ok(Self::ScheduledFor),
            "minutesBefore" | "minutes_before" => Ok(Self::MinutesBefore),
            _ => Err(()),
        }
    }
}

impl Default for OrderBy<ReminderOrderField> {
    fn default() -> Self {
        Self::asc(ReminderOrderField::ScheduledFor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLogOrderField {
    CreatedAt,
}

impl FromStr for NotificationLogOrderField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            _ => Err(()),
        }
    }
}

impl Default for OrderBy<NotificationLogOrderField> {
    fn default() -> Self {
        Self::desc(NotificationLogOrderField::CreatedAt)
    }
}

/// Filters for listing the `Event`s of a `User`. All the given filters
/// must match.
#[derive(Debug, Clone)]
pub struct EventQuery {
    pub user_id: ID,
    /// `start >= start_after`
    pub start_after: Option<DateTime<Utc>>,
    /// `end <= end_before`
    pub end_before: Option<DateTime<Utc>>,
    /// Events touching the span: `end >= span.0 && start <= span.1`
    pub touching: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub is_all_day: Option<bool>,
    /// Case insensitive substring of title, description or location
    pub search: Option<String>,
    pub order_by: OrderBy<EventOrderField>,
}

impl EventQuery {
    pub fn for_user(user_id: ID) -> Self {
        Self {
            user_id,
            start_after: None,
            end_before: None,
            touching: None,
            is_all_day: None,
            search: None,
            order_by: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_orderings() {
        assert_eq!(
            "start".parse::<OrderBy<EventOrderField>>(),
            Ok(OrderBy::asc(EventOrderField::Start))
        );
        assert_eq!(
            "-title".parse::<OrderBy<EventOrderField>>(),
            Ok(OrderBy::desc(EventOrderField::Title))
        );
        assert_eq!(
            "-minutesBefore".parse::<OrderBy<ReminderOrderField>>(),
            Ok(OrderBy::desc(ReminderOrderField::MinutesBefore))
        );
        assert_eq!(
            "created_at".parse::<OrderBy<NotificationLogOrderField>>(),
            Ok(OrderBy::asc(NotificationLogOrderField::CreatedAt))
        );
        assert!("location".parse::<OrderBy<EventOrderField>>().is_err());
        assert!("--start".parse::<OrderBy<EventOrderField>>().is_err());
    }

    #[test]
    fn it_has_sensible_default_orderings() {
        assert!(!OrderBy::<EventOrderField>::default().descending);
        assert!(OrderBy::<NotificationLogOrderField>::default().descending);
    }
}
