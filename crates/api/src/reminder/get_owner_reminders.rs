use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use finance_reminders_api_structs::get_owner_reminders::{APIResponse, PathParams};
use finance_reminders_domain::Reminder;
use finance_reminders_infra::ReminderContext;

pub async fn get_owner_reminders_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = GetOwnerRemindersUseCase {
        owner_id: path.owner_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(ApiError::from)
}

#[derive(Debug)]
pub struct GetOwnerRemindersUseCase {
    pub owner_id: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetOwnerRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetOwnerReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_by_owner(self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
