mod base;
mod event;
mod notification;
mod reminder;
mod status;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use event::EventClient;
pub use event::{CreateEventInput, GetEventsInput, UpdateEventInput};
use notification::NotificationClient;
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, UpdateReminderInput};
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;

pub use agenda_api_structs::dtos::*;
pub use agenda_domain::{NotificationStatus, ReminderChannel, ID};
pub use reqwest::StatusCode;

/// Agenda SDK
///
/// The SDK contains methods for interacting with the Agenda server API.
#[derive(Clone)]
pub struct AgendaSDK {
    pub event: EventClient,
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl AgendaSDK {
    /// `api_token` can be empty for the routes not requiring a signed in user
    pub fn new<T: Into<String>>(address: String, api_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_token(api_token.into());
        let base = Arc::new(base);
        let event = EventClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            event,
            notification,
            reminder,
            status,
            user,
        }
    }
}
