use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use finance_reminders_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use finance_reminders_domain::{InvalidReminderError, RecurrenceRule, Reminder, ID};
use finance_reminders_infra::ReminderContext;

pub async fn update_reminder_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    let body = body.0;
    let usecase = UpdateReminderUseCase {
        reminder_id: path.reminder_id,
        title: body.title,
        recurrence: body.recurrence,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(ApiError::from)
}

/// Edits a `Reminder`. Only a new recurrence moves the schedule, which then
/// starts over from the current time.
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub title: Option<String>,
    pub recurrence: Option<RecurrenceRule>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(self.reminder_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let now = ctx.sys.get_local_datetime();
        if let Some(title) = &self.title {
            reminder
                .set_title(title, now)
                .map_err(UseCaseError::InvalidReminder)?;
        }
        let res = match self.recurrence.take() {
            Some(recurrence) => {
                reminder.set_recurrence(recurrence, now);
                ctx.repos.reminders.save(&reminder).await
            }
            // The scheduler may move the trigger meanwhile
            None => {
                ctx.repos
                    .reminders
                    .update_title(&reminder.id, &reminder.title, reminder.updated)
                    .await
            }
        };

        res.map(|_| reminder).map_err(|_| UseCaseError::StorageError)
    }
}
