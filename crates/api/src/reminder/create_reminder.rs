use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use finance_reminders_api_structs::create_reminder::{APIResponse, RequestBody};
use finance_reminders_domain::{InvalidReminderError, RecurrenceRule, Reminder};
use finance_reminders_infra::ReminderContext;

pub async fn create_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = CreateReminderUseCase {
        owner_id: body.owner_id,
        title: body.title,
        recurrence: body.recurrence,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: i64,
    pub title: String,
    pub recurrence: RecurrenceRule,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_local_datetime();
        let reminder = Reminder::new(self.owner_id, &self.title, self.recurrence.clone(), now)
            .map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::test_helpers::{dt, setup_context_at};
    use finance_reminders_domain::TimeOfDay;

    #[actix_web::main]
    #[test]
    async fn it_creates_and_schedules_a_reminder() {
        let ctx = setup_context_at(dt(15, 19, 0));
        let mut usecase = CreateReminderUseCase {
            owner_id: 42,
            title: "Groceries".into(),
            recurrence: RecurrenceRule::Daily {
                time: TimeOfDay::new(20, 0).unwrap(),
            },
        };

        let reminder = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminder.next_trigger_at, dt(15, 20, 0));
        assert_eq!(reminder.created, dt(15, 19, 0));

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(stored, Some(reminder));
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_a_too_long_title() {
        let ctx = setup_context_at(dt(15, 19, 0));
        let mut usecase = CreateReminderUseCase {
            owner_id: 42,
            title: "x".repeat(51),
            recurrence: RecurrenceRule::Daily {
                time: TimeOfDay::new(20, 0).unwrap(),
            },
        };

        let res = usecase.execute(&ctx).await;
        assert!(matches!(
            res,
            Err(UseCaseError::InvalidReminder(
                InvalidReminderError::TitleTooLong { .. }
            ))
        ));
        assert!(ctx.repos.reminders.find_by_owner(42).await.unwrap().is_empty());
    }
}
