use super::IReminderRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDateTime;
use finance_reminders_domain::{RecurrenceRule, Reminder, ID};
use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    owner_id: i64,
    title: String,
    recurrence: Json<RecurrenceRule>,
    next_trigger_at: NaiveDateTime,
    created: NaiveDateTime,
    updated: NaiveDateTime,
}

impl From<ReminderRaw> for Reminder {
    fn from(e: ReminderRaw) -> Self {
        Self {
            id: e.reminder_uid.into(),
            owner_id: e.owner_id,
            title: e.title,
            recurrence: e.recurrence.0,
            next_trigger_at: e.next_trigger_at,
            created: e.created,
            updated: e.updated,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, owner_id, title, recurrence, next_trigger_at, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.owner_id)
        .bind(&reminder.title)
        .bind(Json(&reminder.recurrence))
        .bind(reminder.next_trigger_at)
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to insert reminder: {:?}", e);
            e
        })?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            recurrence = $3,
            next_trigger_at = $4,
            updated = $5
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(Json(&reminder.recurrence))
        .bind(reminder.next_trigger_at)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to update reminder: {:?}", e);
            e
        })?;

        Ok(())
    }

    async fn update_title(
        &self,
        reminder_id: &ID,
        title: &str,
        updated: NaiveDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2,
            updated = $3
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(title)
        .bind(updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to update reminder title: {:?}", e);
            e
        })?;

        Ok(())
    }

    async fn update_next_trigger_at(
        &self,
        reminder_id: &ID,
        previous: NaiveDateTime,
        next: NaiveDateTime,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET next_trigger_at = $3
            WHERE reminder_uid = $1 AND next_trigger_at = $2
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(previous)
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to reschedule reminder: {:?}", e);
            e
        })?;

        Ok(res.rows_affected() == 1)
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder.map(|r| r.into()))
    }

    async fn find_due(&self, now: NaiveDateTime) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE next_trigger_at <= $1
            ORDER BY next_trigger_at
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Unable to look up due reminders: {:?}", e);
            e
        })?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn find_by_owner(&self, owner_id: i64) -> anyhow::Result<Vec<Reminder>> {
        let reminders: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders
            WHERE owner_id = $1
            ORDER BY next_trigger_at
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reminders.into_iter().map(|r| r.into()).collect())
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let reminder: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(reminder.map(|r| r.into()))
    }

    async fn delete_by_owner(&self, owner_id: i64) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminders
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
