use super::IReminderRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use chrono::NaiveDateTime;
use finance_reminders_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn update_title(
        &self,
        reminder_id: &ID,
        title: &str,
        updated: NaiveDateTime,
    ) -> anyhow::Result<()> {
        update(reminder_id, &self.reminders, |reminder| {
            reminder.title = title.to_string();
            reminder.updated = updated;
            true
        });
        Ok(())
    }

    async fn update_next_trigger_at(
        &self,
        reminder_id: &ID,
        previous: NaiveDateTime,
        next: NaiveDateTime,
    ) -> anyhow::Result<bool> {
        Ok(update(reminder_id, &self.reminders, |reminder| {
            if reminder.next_trigger_at != previous {
                return false;
            }
            reminder.next_trigger_at = next;
            true
        }))
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_due(&self, now: NaiveDateTime) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |reminder| reminder.is_due(now)))
    }

    async fn find_by_owner(&self, owner_id: i64) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |reminder| reminder.owner_id == owner_id);
        reminders.sort_by_key(|reminder| reminder.next_trigger_at);
        Ok(reminders)
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }

    async fn delete_by_owner(&self, owner_id: i64) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.reminders, |reminder| {
            reminder.owner_id == owner_id
        }))
    }
}
