use crate::{reminder::SendDueRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use agenda_infra::AgendaContext;
use std::time::Duration;
use tracing::info;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Dispatches the due reminders at the start of every interval, the first
/// run being aligned to the start of the next minute
pub fn start_send_reminders_job(ctx: AgendaContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);
        let period = Duration::from_secs(ctx.config.reminders_job_interval_secs);

        let mut job_interval = interval_at(start, period);
        loop {
            job_interval.tick().await;
            send_due_reminders(&ctx).await;
        }
    });
}

async fn send_due_reminders(ctx: &AgendaContext) {
    // Failures are logged by `execute` and retried on the next tick
    if let Ok(sent) = execute(SendDueRemindersUseCase {}, ctx).await {
        info!(sent, "Due reminders dispatched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }
}
