mod create_reminder;
mod delete_reminder;
mod get_reminder;
mod get_reminders;
mod send_due_reminders;
mod update_reminder;

use actix_web::web;
use agenda_domain::{Reminder, User, ID};
use agenda_infra::AgendaContext;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_reminder::get_reminder_controller;
use get_reminders::get_reminders_controller;
pub use send_due_reminders::SendDueRemindersUseCase;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::patch().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
}

/// The `Reminder` if it exists and belongs to an `Event` owned by the `User`
async fn find_user_reminder(
    reminder_id: &ID,
    user: &User,
    ctx: &AgendaContext,
) -> Option<Reminder> {
    let reminder = ctx.repos.reminders.find(reminder_id).await?;
    crate::event::find_user_event(&reminder.event_id, user, ctx).await?;
    Some(reminder)
}

/// Whether another `Reminder` of the same `Event` already fires at the
/// same lead time on the same channel
async fn has_conflict(reminder: &Reminder, ctx: &AgendaContext) -> anyhow::Result<bool> {
    Ok(ctx
        .repos
        .reminders
        .find_by_event(&reminder.event_id)
        .await?
        .iter()
        .any(|r| r.conflicts_with(reminder)))
}
