use crate::{
    reminder::{
        send_due_reminders::SendDueRemindersUseCase,
        sync_reminder_schedules::SyncReminderSchedulesUseCase,
    },
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep};
use guardian_reminders_infra::GuardianContext;
use std::time::Duration;
use tracing::info;

/// Seconds from `now_ts` (millis) until the next multiple of `interval_secs`
/// since the unix epoch
pub fn get_start_delay(now_ts: i64, interval_secs: u64) -> u64 {
    let interval_secs = interval_secs.max(1);
    let now_secs = (now_ts / 1000) as u64;
    interval_secs - now_secs % interval_secs
}

/// Periodically expires passed reminders and regenerates the schedules of
/// the ones not generated today
pub fn start_reminders_generation_job(ctx: GuardianContext) {
    actix_web::rt::spawn(async move {
        let interval_secs = ctx.config.reminder_generation_interval_secs.max(1);
        info!(
            "Starting reminders generation job with interval: {}s",
            interval_secs
        );
        let mut interval = interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;

            let _ = execute(SyncReminderSchedulesUseCase, &ctx).await;
        }
    });
}

/// Periodically sends the reminders that are due. Sweeps are aligned to
/// multiples of the interval, e.g. every five minutes on the clock.
pub fn start_send_reminders_job(ctx: GuardianContext) {
    actix_web::rt::spawn(async move {
        let interval_secs = ctx.config.reminder_dispatch_interval_secs.max(1);
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now, interval_secs);
        info!(
            "Starting send reminders job in {}s with interval: {}s",
            secs_to_next_run, interval_secs
        );

        sleep(Duration::from_secs(secs_to_next_run)).await;
        let mut interval = interval(Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_reminders(context));
        }
    });
}

async fn send_reminders(ctx: GuardianContext) {
    let usecase = SendDueRemindersUseCase {
        window_millis: ctx.config.reminder_dispatch_window_millis,
    };
    let _ = execute(usecase, &ctx).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 60), 10);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(59 * 1000, 60), 1);
        assert_eq!(get_start_delay(59_999, 60), 1);
        assert_eq!(get_start_delay(0, 300), 300);
        assert_eq!(get_start_delay(7 * 60 * 1000, 300), 180);
        assert_eq!(get_start_delay(12_345, 0), 1);
    }
}
