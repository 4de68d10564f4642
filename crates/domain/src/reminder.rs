use crate::{
    recurrence::RecurrenceRule,
    shared::entity::{Entity, ID},
};
use chrono::NaiveDateTime;
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 50;

/// A `Reminder` asks its owner, on a recurring schedule, to record their
/// financial activity.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The destination that should be notified, e.g. a Telegram chat id
    pub owner_id: i64,
    pub title: String,
    pub recurrence: RecurrenceRule,
    /// The next instant at which the owner should be notified. This is the
    /// only field the reminders job reads to decide whether a `Reminder` is due
    /// and the only field it changes after a successful delivery.
    pub next_trigger_at: NaiveDateTime,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderError {
    #[error("Reminder title can not be empty")]
    EmptyTitle,
    #[error("Reminder title can be at most {max} characters long, got: {len}")]
    TitleTooLong { len: usize, max: usize },
}

fn validate_title(title: &str) -> Result<String, InvalidReminderError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(InvalidReminderError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(InvalidReminderError::TitleTooLong {
            len,
            max: MAX_TITLE_LEN,
        });
    }
    Ok(title.to_string())
}

impl Reminder {
    pub fn new(
        owner_id: i64,
        title: &str,
        recurrence: RecurrenceRule,
        now: NaiveDateTime,
    ) -> Result<Self, InvalidReminderError> {
        let title = validate_title(title)?;
        Ok(Self {
            id: Default::default(),
            owner_id,
            title,
            next_trigger_at: recurrence.next_trigger_at(now),
            recurrence,
            created: now,
            updated: now,
        })
    }

    pub fn set_title(&mut self, title: &str, now: NaiveDateTime) -> Result<(), InvalidReminderError> {
        self.title = validate_title(title)?;
        self.updated = now;
        Ok(())
    }

    /// Replaces the `RecurrenceRule`. The schedule starts over from `now`, the
    /// phase of the previous rule is not kept.
    pub fn set_recurrence(&mut self, recurrence: RecurrenceRule, now: NaiveDateTime) {
        self.next_trigger_at = recurrence.next_trigger_at(now);
        self.recurrence = recurrence;
        self.updated = now;
    }

    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.next_trigger_at <= now
    }

    /// The same `Reminder` scheduled for its next occurrence after `now`
    pub fn rescheduled(&self, now: NaiveDateTime) -> Self {
        Self {
            next_trigger_at: self.recurrence.next_trigger_at(now),
            ..self.clone()
        }
    }

    pub fn notification_text(&self) -> String {
        format!(
            "📣 {}\n\nDon't forget to record your expenses and income.",
            self.title
        )
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
