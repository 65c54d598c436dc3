mod date;
mod event;
pub mod ics;
mod notification_log;
mod reminder;
mod shared;
mod user;

pub use chrono_tz::Tz;
pub use date::{day_bounds, format_local, parse_date, parse_local_datetime};
pub use event::{Event, EventValidationError, EVENT_LOCATION_MAX_LEN, EVENT_TITLE_MAX_LEN};
pub use notification_log::{NotificationLog, NotificationStatus};
pub use reminder::{
    Reminder, ReminderChannel, ReminderValidationError, DEFAULT_MINUTES_BEFORE,
    MAX_MINUTES_BEFORE,
};
pub use shared::entity::{Entity, ID};
pub use user::{User, UserValidationError};
