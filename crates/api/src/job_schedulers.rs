use crate::{reminder::send_due_reminders::SendDueRemindersUseCase, shared::usecase::execute};
use chrono::{NaiveDateTime, Timelike};
use finance_reminders_infra::ReminderContext;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Time left until the start of the next minute. Reminders have minute
/// resolution so ticks are aligned to whole minutes.
pub fn get_start_delay(now: NaiveDateTime) -> Duration {
    match now.second() {
        0 => Duration::from_secs(0),
        secs => Duration::from_secs(60 - secs as u64),
    }
}

/// Periodically sends all due reminders until `shutdown` is cancelled.
///
/// A tick always runs to completion, cancellation is only observed while
/// waiting for the next one.
pub fn start_send_reminders_job(
    ctx: ReminderContext,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    actix_web::rt::spawn(async move {
        let period = ctx.config.reminder_poll_interval;
        let start = Instant::now() + get_start_delay(ctx.sys.get_local_datetime());
        let mut interval = interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            "Reminders job started, polling every {} seconds",
            period.as_secs()
        );

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {}
            }

            let _ = execute(SendDueRemindersUseCase, &ctx).await;
        }

        info!("Reminders job stopped");
    })
}
