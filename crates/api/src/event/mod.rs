mod create_event;
mod delete_event;
mod export_event_ics;
mod get_event;
mod get_events;
mod update_event;

use actix_web::web;
use agenda_api_structs::dtos::ReminderInputDTO;
use agenda_domain::{
    Event, Reminder, ReminderValidationError, User, DEFAULT_MINUTES_BEFORE, ID,
};
use agenda_infra::AgendaContext;
pub use create_event::CreateEventUseCase;
use create_event::create_event_controller;
pub use delete_event::DeleteEventUseCase;
use delete_event::delete_event_controller;
use export_event_ics::export_event_ics_controller;
pub use get_event::GetEventUseCase;
use get_event::get_event_controller;
pub use get_events::GetEventsUseCase;
use get_events::get_events_controller;
use update_event::update_event_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(create_event_controller));
    cfg.route("/events", web::get().to(get_events_controller));
    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route("/events/{event_id}", web::patch().to(update_event_controller));
    cfg.route(
        "/events/{event_id}",
        web::delete().to(delete_event_controller),
    );
    cfg.route(
        "/events/{event_id}/export/ics",
        web::get().to(export_event_ics_controller),
    );
}

/// The `Event` if it exists and is owned by the `User`
pub async fn find_user_event(event_id: &ID, user: &User, ctx: &AgendaContext) -> Option<Event> {
    match ctx.repos.events.find(event_id).await {
        Some(event) if event.user_id == user.id => Some(event),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
pub enum ReminderInputError {
    Invalid(ReminderValidationError),
    Duplicate,
}

/// Builds the `Reminder`s given together with an `Event`. The default
/// reminder is used when `inputs` is `None` or empty and `use_default` is set.
pub fn reminders_from_input(
    event: &Event,
    inputs: &[ReminderInputDTO],
    use_default: bool,
) -> Result<Vec<Reminder>, ReminderInputError> {
    if inputs.is_empty() && use_default {
        let reminder = Reminder::new(event, DEFAULT_MINUTES_BEFORE, Default::default())
            .map_err(ReminderInputError::Invalid)?;
        return Ok(vec![reminder]);
    }

    let mut reminders: Vec<Reminder> = Vec::with_capacity(inputs.len());
    for input in inputs {
        let reminder = Reminder::new(
            event,
            input.minutes_before.unwrap_or(DEFAULT_MINUTES_BEFORE),
            input.channel.unwrap_or_default(),
        )
        .map_err(ReminderInputError::Invalid)?;
        if reminders.iter().any(|r| r.conflicts_with(&reminder)) {
            return Err(ReminderInputError::Duplicate);
        }
        reminders.push(reminder);
    }
    Ok(reminders)
}
