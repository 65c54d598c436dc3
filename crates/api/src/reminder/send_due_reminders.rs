use crate::shared::usecase::UseCase;
use agenda_domain::{format_local, Event, NotificationLog, Reminder, Tz, User};
use agenda_infra::{AgendaContext, EmailMessage};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

/// Sends an email for every `Reminder` that is due and not yet sent.
/// Every `Reminder` is handled while holding an exclusive lock on it, so
/// overlapping runs never send the same `Reminder` twice. Failed sends are
/// logged and retried on the next run.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    /// Number of `Reminder`s sent
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let due = ctx
            .repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut sent_count = 0;
        for reminder in due {
            match dispatch(&reminder, now, ctx).await {
                Ok(true) => sent_count += 1,
                Ok(false) => (),
                Err(e) => error!(
                    reminder_id = %reminder.id,
                    "Unable to dispatch reminder: {:?}", e
                ),
            }
        }

        Ok(sent_count)
    }
}

/// Returns whether the `Reminder` was sent
async fn dispatch(
    reminder: &Reminder,
    now: DateTime<Utc>,
    ctx: &AgendaContext,
) -> anyhow::Result<bool> {
    let mut lock = match ctx.repos.reminders.lock_for_dispatch(&reminder.id).await? {
        Some(lock) => lock,
        // Deleted after it was selected
        None => return Ok(false),
    };
    if lock.reminder().is_sent {
        return Ok(false);
    }
    let reminder = lock.reminder().clone();

    let event = match ctx.repos.events.find(&reminder.event_id).await {
        Some(event) => event,
        None => return Ok(false),
    };
    let user = match ctx.repos.users.find(&event.user_id).await {
        Some(user) => user,
        None => {
            warn!(event_id = %event.id, "Event owner not found");
            return Ok(false);
        }
    };

    let message = reminder_email(
        &user,
        &event,
        &reminder,
        &ctx.config.time_zone,
        &ctx.config.default_from_email,
    );
    let sent = match ctx.mailer.send(&message).await {
        Ok(_) => {
            lock.append_log(&NotificationLog::sent(&event, &reminder, now))
                .await?;
            lock.mark_sent(now).await?;
            info!(reminder_id = %reminder.id, to = %user.email, "Reminder sent");
            true
        }
        Err(e) => {
            lock.append_log(&NotificationLog::failed(
                &event,
                &reminder,
                e.to_string(),
                now,
            ))
            .await?;
            warn!(reminder_id = %reminder.id, "Reminder email failed: {}", e);
            false
        }
    };
    lock.commit().await?;

    Ok(sent)
}

pub fn reminder_email(
    user: &User,
    event: &Event,
    reminder: &Reminder,
    tz: &Tz,
    from: &str,
) -> EmailMessage {
    let or_dash = |s: &str| {
        if s.trim().is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };

    let body = format!(
        "Hello {},\n\nYour event \"{}\" starts in {} minutes.\nStart: {}\nLocation: {}\n\nDescription:\n{}\n",
        user.username,
        event.title,
        reminder.minutes_before,
        format_local(&event.start, tz, "%d/%m/%Y %H:%M"),
        or_dash(&event.location),
        or_dash(&event.description),
    );

    EmailMessage {
        from: from.to_string(),
        to: vec![user.email.clone()],
        subject: format!("Reminder: {}", event.title),
        body,
    }
}
