use chrono::NaiveDateTime;
use finance_reminders_domain::{RecurrenceRule, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub owner_id: i64,
    pub title: String,
    pub recurrence: RecurrenceRule,
    /// Human readable description of the recurrence, e.g. "every day at 20:00"
    pub periodicity: String,
    pub next_trigger_at: NaiveDateTime,
    pub created: NaiveDateTime,
    pub updated: NaiveDateTime,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            owner_id: reminder.owner_id,
            title: reminder.title,
            periodicity: reminder.recurrence.to_string(),
            recurrence: reminder.recurrence,
            next_trigger_at: reminder.next_trigger_at,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}
