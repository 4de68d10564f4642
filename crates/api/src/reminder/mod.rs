use actix_web::web;

mod create_reminder;
mod delete_owner_reminders;
mod delete_reminder;
mod get_owner_reminders;
mod get_reminder;
pub mod send_due_reminders;
mod update_reminder;

use create_reminder::create_reminder_controller;
use delete_owner_reminders::delete_owner_reminders_controller;
use delete_reminder::delete_reminder_controller;
use get_owner_reminders::get_owner_reminders_controller;
use get_reminder::get_reminder_controller;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminder", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminder/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminder/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );

    cfg.route(
        "/owner/{owner_id}/reminders",
        web::get().to(get_owner_reminders_controller),
    );
    cfg.route(
        "/owner/{owner_id}/reminders",
        web::delete().to(delete_owner_reminders_controller),
    );
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use chrono::{NaiveDate, NaiveDateTime};
    use finance_reminders_domain::{Reminder, ID};
    use finance_reminders_infra::{
        Config, DeleteResult, DeliveryError, IReminderDelivery, IReminderRepo, ISys,
        ReminderContext, Repos,
    };
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    pub fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    pub struct StaticTimeSys(pub NaiveDateTime);
    impl ISys for StaticTimeSys {
        fn get_local_datetime(&self) -> NaiveDateTime {
            self.0
        }
    }

    /// Inmemory context frozen at `now` that delivers to nobody
    pub fn setup_context_at(now: NaiveDateTime) -> ReminderContext {
        ReminderContext {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(StaticTimeSys(now)),
            delivery: Arc::new(ScriptedDelivery::default()),
        }
    }

    /// Delivery that fails for chosen owners and records every attempt
    #[derive(Default)]
    pub struct ScriptedDelivery {
        failing_owners: Mutex<HashSet<i64>>,
        attempts: Mutex<Vec<(i64, String, bool)>>,
    }

    impl ScriptedDelivery {
        pub fn failing_for(owner_ids: &[i64]) -> Self {
            Self {
                failing_owners: Mutex::new(owner_ids.iter().copied().collect()),
                ..Default::default()
            }
        }

        pub fn recover(&self, owner_id: i64) {
            self.failing_owners.lock().unwrap().remove(&owner_id);
        }

        pub fn clear(&self) {
            self.attempts.lock().unwrap().clear();
        }

        /// Messages that were delivered
        pub fn sent(&self) -> Vec<(i64, String)> {
            self.attempts
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, _, delivered)| *delivered)
                .map(|(owner_id, text, _)| (*owner_id, text.clone()))
                .collect()
        }

        pub fn attempted_owners(&self) -> Vec<i64> {
            self.attempts
                .lock()
                .unwrap()
                .iter()
                .map(|(owner_id, _, _)| *owner_id)
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl IReminderDelivery for ScriptedDelivery {
        async fn send(&self, owner_id: i64, text: &str) -> Result<(), DeliveryError> {
            let delivered = !self.failing_owners.lock().unwrap().contains(&owner_id);
            self.attempts
                .lock()
                .unwrap()
                .push((owner_id, text.to_string(), delivered));
            if delivered {
                Ok(())
            } else {
                Err(DeliveryError::Rejected {
                    status: 403,
                    description: "Forbidden: bot was blocked by the user".into(),
                })
            }
        }
    }

    /// Inmemory repo where saving and rescheduling fail for chosen owners
    pub struct FlakyRepo {
        inner: Arc<dyn IReminderRepo>,
        failing_owners: HashSet<i64>,
    }

    impl FlakyRepo {
        pub fn failing_saves_for(owner_ids: &[i64]) -> Self {
            Self {
                inner: Repos::create_inmemory().reminders,
                failing_owners: owner_ids.iter().copied().collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl IReminderRepo for FlakyRepo {
        async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
            self.inner.insert(reminder).await
        }

        async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
            if self.failing_owners.contains(&reminder.owner_id) {
                anyhow::bail!("Connection reset");
            }
            self.inner.save(reminder).await
        }

        async fn update_title(
            &self,
            reminder_id: &ID,
            title: &str,
            updated: NaiveDateTime,
        ) -> anyhow::Result<()> {
            self.inner.update_title(reminder_id, title, updated).await
        }

        async fn update_next_trigger_at(
            &self,
            reminder_id: &ID,
            previous: NaiveDateTime,
            next: NaiveDateTime,
        ) -> anyhow::Result<bool> {
            if let Some(reminder) = self.inner.find(reminder_id).await? {
                if self.failing_owners.contains(&reminder.owner_id) {
                    anyhow::bail!("Connection reset");
                }
            }
            self.inner
                .update_next_trigger_at(reminder_id, previous, next)
                .await
        }

        async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
            self.inner.find(reminder_id).await
        }

        async fn find_due(&self, now: NaiveDateTime) -> anyhow::Result<Vec<Reminder>> {
            self.inner.find_due(now).await
        }

        async fn find_by_owner(&self, owner_id: i64) -> anyhow::Result<Vec<Reminder>> {
            self.inner.find_by_owner(owner_id).await
        }

        async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
            self.inner.delete(reminder_id).await
        }

        async fn delete_by_owner(&self, owner_id: i64) -> anyhow::Result<DeleteResult> {
            self.inner.delete_by_owner(owner_id).await
        }
    }
}
