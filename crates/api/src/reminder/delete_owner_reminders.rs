use crate::{
    error::ApiError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use finance_reminders_api_structs::delete_owner_reminders::{APIResponse, PathParams};
use finance_reminders_infra::{DeleteResult, ReminderContext};

pub async fn delete_owner_reminders_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ApiError> {
    let usecase = DeleteOwnerRemindersUseCase {
        owner_id: path.owner_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                deleted_count: res.deleted_count,
            })
        })
        .map_err(ApiError::from)
}

/// Removes every `Reminder` of an owner, e.g. when the owner leaves
#[derive(Debug)]
pub struct DeleteOwnerRemindersUseCase {
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
impl UseCase for DeleteOwnerRemindersUseCase {
    type Response = DeleteResult;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteOwnerReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_by_owner(self.owner_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
