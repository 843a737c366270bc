use super::validation::{find_user_reminder, ReminderLookupError};
use crate::{
    error::GuardianError,
    shared::usecase::{execute, UseCase},
    user::{find_user, UserLookupError},
};
use actix_web::{web, HttpResponse};
use guardian_reminders_api_structs::view_reminder::*;
use guardian_reminders_domain::{ReminderConfiguration, ReminderSchedule, ID};
use guardian_reminders_infra::GuardianContext;

pub async fn view_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let usecase = ViewReminderUseCase {
        user_id: path_params.user_id.clone(),
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.reminder, res.schedules)))
        .map_err(GuardianError::from)
}

#[derive(Debug)]
pub struct ViewReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: ReminderConfiguration,
    pub schedules: Vec<ReminderSchedule>,
}

#[derive(Debug)]
pub enum UseCaseError {
    User(UserLookupError),
    Lookup(ReminderLookupError),
    StorageError,
}

impl From<UseCaseError> for GuardianError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::User(e) => e.into(),
            UseCaseError::Lookup(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ViewReminderUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "ViewReminder";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let user = find_user(&self.user_id, ctx).await.map_err(UseCaseError::User)?;
        let reminder = find_user_reminder(&user.id, &self.reminder_id, ctx)
            .await
            .map_err(UseCaseError::Lookup)?;
        let schedules = ctx
            .repos
            .reminder_schedules
            .find_by_reminder(&reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseRes {
            reminder,
            schedules,
        })
    }
}
