mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDateTime;
use finance_reminders_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Changes only the title of a stored `Reminder`, its schedule is left as is
    async fn update_title(
        &self,
        reminder_id: &ID,
        title: &str,
        updated: NaiveDateTime,
    ) -> anyhow::Result<()>;
    /// Moves a `Reminder` from `previous` to `next`. Nothing is changed, and
    /// `false` returned, when the stored trigger is no longer `previous`.
    async fn update_next_trigger_at(
        &self,
        reminder_id: &ID,
        previous: NaiveDateTime,
        next: NaiveDateTime,
    ) -> anyhow::Result<bool>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// All `Reminder`s that should have been sent at `now`
    async fn find_due(&self, now: NaiveDateTime) -> anyhow::Result<Vec<Reminder>>;
    /// All `Reminder`s of an owner, soonest first
    async fn find_by_owner(&self, owner_id: i64) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    async fn delete_by_owner(&self, owner_id: i64) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::{setup_context, ReminderContext};
    use chrono::{NaiveDate, NaiveDateTime};
    use finance_reminders_domain::{DayOfWeek, Entity, RecurrenceRule, Reminder, TimeOfDay};

    /// Creates inmemory and postgres context when DATABASE_URL is set,
    /// otherwise it will only create the inmemory one
    async fn create_contexts() -> Vec<ReminderContext> {
        let mut contexts = vec![ReminderContext::create_inmemory()];
        if std::env::var("DATABASE_URL").is_ok() {
            contexts.push(setup_context().await.expect("Postgres to be available"));
        }
        contexts
    }

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn daily(hour: u32) -> RecurrenceRule {
        RecurrenceRule::Daily {
            time: TimeOfDay::new(hour, 0).unwrap(),
        }
    }

    // Owner ids are random so that runs against a shared database do not interfere
    fn owner_id() -> i64 {
        (uuid::Uuid::new_v4().as_u128() >> 80) as i64
    }

    #[tokio::test]
    async fn create_and_delete() {
        for ctx in create_contexts().await {
            let reminder = Reminder::new(owner_id(), "Groceries", daily(20), dt(15, 10, 0)).unwrap();

            // Insert
            assert!(ctx.repos.reminders.insert(&reminder).await.is_ok());

            // Find
            let res = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
            assert!(Entity::eq(&res, &reminder));
            assert_eq!(res.recurrence, reminder.recurrence);
            assert_eq!(res.next_trigger_at, reminder.next_trigger_at);

            // Delete
            let res = ctx.repos.reminders.delete(&reminder.id).await.unwrap();
            assert!(res.is_some());
            assert!(Entity::eq(&res.unwrap(), &reminder));

            // Find
            assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
            assert!(ctx.repos.reminders.delete(&reminder.id).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn update() {
        for ctx in create_contexts().await {
            let mut reminder = Reminder::new(owner_id(), "Rent", daily(9), dt(15, 10, 0)).unwrap();
            ctx.repos.reminders.insert(&reminder).await.unwrap();

            reminder.set_title("Rent and utilities", dt(15, 11, 0)).unwrap();
            reminder.set_recurrence(
                RecurrenceRule::Weekly {
                    time: TimeOfDay::new(18, 30).unwrap(),
                    day_of_week: DayOfWeek::new(5).unwrap(),
                },
                dt(15, 11, 0),
            );

            // Save
            assert!(ctx.repos.reminders.save(&reminder).await.is_ok());

            // Find
            let res = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
            assert_eq!(res, reminder);
        }
    }

    #[tokio::test]
    async fn update_next_trigger_at_only_moves_the_expected_trigger() {
        for ctx in create_contexts().await {
            let reminder = Reminder::new(owner_id(), "Groceries", daily(20), dt(15, 10, 0)).unwrap();
            ctx.repos.reminders.insert(&reminder).await.unwrap();

            // Edited in the meantime
            let mut edited = reminder.clone();
            edited.set_title("Groceries and pharmacy", dt(15, 11, 0)).unwrap();
            ctx.repos.reminders.save(&edited).await.unwrap();

            let moved = ctx
                .repos
                .reminders
                .update_next_trigger_at(&reminder.id, dt(15, 20, 0), dt(16, 20, 0))
                .await
                .unwrap();
            assert!(moved);
            let res = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
            assert_eq!(res.title, "Groceries and pharmacy");
            assert_eq!(res.updated, dt(15, 11, 0));
            assert_eq!(res.next_trigger_at, dt(16, 20, 0));

            // Stale trigger
            let moved = ctx
                .repos
                .reminders
                .update_next_trigger_at(&reminder.id, dt(15, 20, 0), dt(17, 20, 0))
                .await
                .unwrap();
            assert!(!moved);
            let res = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
            assert_eq!(res.next_trigger_at, dt(16, 20, 0));

            ctx.repos.reminders.delete(&reminder.id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn update_title_keeps_the_schedule() {
        for ctx in create_contexts().await {
            let reminder = Reminder::new(owner_id(), "Rent", daily(9), dt(15, 10, 0)).unwrap();
            ctx.repos.reminders.insert(&reminder).await.unwrap();
            ctx.repos
                .reminders
                .update_next_trigger_at(&reminder.id, dt(16, 9, 0), dt(17, 9, 0))
                .await
                .unwrap();

            ctx.repos
                .reminders
                .update_title(&reminder.id, "Rent and utilities", dt(16, 12, 0))
                .await
                .unwrap();

            let res = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
            assert_eq!(res.title, "Rent and utilities");
            assert_eq!(res.updated, dt(16, 12, 0));
            assert_eq!(res.next_trigger_at, dt(17, 9, 0));
            assert_eq!(res.recurrence, reminder.recurrence);

            ctx.repos.reminders.delete(&reminder.id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn find_due_includes_exactly_due_reminders() {
        for ctx in create_contexts().await {
            let owner_id = owner_id();
            let now = dt(20, 12, 0);
            // Fires 20th 12:00, exactly due
            let exactly_due = Reminder::new(owner_id, "Exactly", daily(12), dt(20, 11, 0)).unwrap();
            // Fires 20th 9:00, overdue
            let overdue = Reminder::new(owner_id, "Overdue", daily(9), dt(20, 8, 0)).unwrap();
            // Fires 20th 13:00, not yet due
            let upcoming = Reminder::new(owner_id, "Upcoming", daily(13), dt(20, 11, 0)).unwrap();
            for reminder in &[&exactly_due, &overdue, &upcoming] {
                ctx.repos.reminders.insert(reminder).await.unwrap();
            }

            let due = ctx
                .repos
                .reminders
                .find_due(now)
                .await
                .unwrap()
                .into_iter()
                .filter(|r| r.owner_id == owner_id)
                .collect::<Vec<_>>();
            assert_eq!(due.len(), 2);
            assert!(due.iter().any(|r| r.id == exactly_due.id));
            assert!(due.iter().any(|r| r.id == overdue.id));

            ctx.repos.reminders.delete_by_owner(owner_id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn find_and_delete_by_owner() {
        for ctx in create_contexts().await {
            let owner_id = owner_id();
            let other_owner_id = owner_id + 1;
            let later = Reminder::new(owner_id, "Later", daily(20), dt(15, 10, 0)).unwrap();
            let sooner = Reminder::new(owner_id, "Sooner", daily(11), dt(15, 10, 0)).unwrap();
            let other = Reminder::new(other_owner_id, "Other", daily(12), dt(15, 10, 0)).unwrap();
            for reminder in &[&later, &sooner, &other] {
                ctx.repos.reminders.insert(reminder).await.unwrap();
            }

            let res = ctx.repos.reminders.find_by_owner(owner_id).await.unwrap();
            assert_eq!(res.len(), 2);
            assert_eq!(res[0].id, sooner.id);
            assert_eq!(res[1].id, later.id);

            let res = ctx.repos.reminders.delete_by_owner(owner_id).await.unwrap();
            assert_eq!(res.deleted_count, 2);
            assert!(ctx
                .repos
                .reminders
                .find_by_owner(owner_id)
                .await
                .unwrap()
                .is_empty());
            assert_eq!(
                ctx.repos
                    .reminders
                    .find_by_owner(other_owner_id)
                    .await
                    .unwrap()
                    .len(),
                1
            );

            ctx.repos.reminders.delete(&other.id).await.unwrap();
        }
    }
}
