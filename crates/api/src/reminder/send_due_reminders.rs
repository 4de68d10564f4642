use crate::shared::usecase::UseCase;
use chrono::NaiveDateTime;
use finance_reminders_domain::Reminder;
use finance_reminders_infra::{DeliveryError, IReminderDelivery, IReminderRepo, ReminderContext};
use tracing::{error, info, warn};

/// Outcome of one pass over the due `Reminder`s
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub due: usize,
    /// Delivered and scheduled for their next occurrence
    pub delivered: usize,
    /// Delivery or storage failed, these stay due and are retried on the next tick
    pub failed: usize,
}

/// Delivers every due `Reminder` and moves it to its next occurrence.
///
/// A `Reminder` is only rescheduled after it has been delivered, so a failed
/// delivery leaves it due and it is attempted again on the next tick. There is
/// no backoff and no limit on the number of attempts.
#[derive(Debug)]
pub struct SendDueRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = TickReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_local_datetime();
        let due_reminders = ctx.repos.reminders.find_due(now).await.map_err(|e| {
            error!("Unable to look up due reminders: {:?}", e);
            UseCaseError::StorageError
        })?;

        let mut report = TickReport {
            due: due_reminders.len(),
            ..Default::default()
        };
        if due_reminders.is_empty() {
            return Ok(report);
        }

        for reminder in due_reminders {
            if let Err(e) = deliver_reminder(ctx.delivery.as_ref(), &reminder).await {
                warn!(
                    reminder_id = %reminder.id,
                    owner_id = reminder.owner_id,
                    "Unable to deliver reminder, it will be retried: {}",
                    e
                );
                report.failed += 1;
                continue;
            }

            match reschedule_reminder(ctx.repos.reminders.as_ref(), &reminder, now).await {
                Ok(_) => report.delivered += 1,
                Err(e) => {
                    error!(
                        reminder_id = %reminder.id,
                        "Reminder was delivered but could not be rescheduled: {:?}",
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            due = report.due,
            delivered = report.delivered,
            failed = report.failed,
            "Processed due reminders"
        );

        Ok(report)
    }
}

/// Sends the notification of a `Reminder` to its owner
pub async fn deliver_reminder(
    delivery: &dyn IReminderDelivery,
    reminder: &Reminder,
) -> Result<(), DeliveryError> {
    delivery
        .send(reminder.owner_id, &reminder.notification_text())
        .await
}

/// Moves the stored `Reminder` to its next occurrence after `now`. Only the
/// trigger is written, and only if nobody has moved it since it was read.
pub async fn reschedule_reminder(
    repo: &dyn IReminderRepo,
    reminder: &Reminder,
    now: NaiveDateTime,
) -> anyhow::Result<Reminder> {
    let rescheduled = reminder.rescheduled(now);
    let moved = repo
        .update_next_trigger_at(
            &reminder.id,
            reminder.next_trigger_at,
            rescheduled.next_trigger_at,
        )
        .await?;
    if !moved {
        info!(
            reminder_id = %reminder.id,
            "Reminder was edited or deleted while being delivered, keeping the stored schedule"
        );
    }
    Ok(rescheduled)
}
