use super::{
    generate_reminder_schedules::{
        GenerateReminderSchedulesTrigger, GenerateReminderSchedulesUseCase,
    },
    validation::{find_user_reminder, ReminderLookupError},
};
use crate::{
    error::GuardianError,
    shared::{
        actor::get_actor,
        usecase::{execute, UseCase},
    },
    user::{find_user, UserLookupError},
};
use actix_web::{web, HttpRequest, HttpResponse};
use guardian_reminders_api_structs::change_reminder_status::*;
use guardian_reminders_domain::{ReminderConfiguration, ReminderStatus, ID};
use guardian_reminders_infra::GuardianContext;

pub async fn change_reminder_status_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let path_params = path_params.into_inner();
    let usecase = ChangeReminderStatusUseCase {
        user_id: path_params.user_id,
        reminder_id: path_params.reminder_id,
        status: path_params.status,
        actor: get_actor(&http_req)?,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(GuardianError::from)
}

/// Activates or deactivates a reminder. Deactivation purges the pending
/// schedules, activation generates them again.
#[derive(Debug)]
pub struct ChangeReminderStatusUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub status: String,
    pub actor: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    User(UserLookupError),
    Lookup(ReminderLookupError),
    InvalidStatus(String),
    StatusUnchanged(String),
    StorageError,
}

impl From<UseCaseError> for GuardianError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::User(e) => e.into(),
            UseCaseError::Lookup(e) => e.into(),
            UseCaseError::InvalidStatus(status) => Self::InvalidReminderStatus(status),
            UseCaseError::StatusUnchanged(status) => Self::ReminderStatusUnchanged(status),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ChangeReminderStatusUseCase {
    type Response = ReminderConfiguration;

    type Error = UseCaseError;

    const NAME: &'static str = "ChangeReminderStatus";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let user = find_user(&self.user_id, ctx).await.map_err(UseCaseError::User)?;
        let status = self
            .status
            .parse::<ReminderStatus>()
            .map_err(|_| UseCaseError::InvalidStatus(self.status.clone()))?;
        let mut reminder = find_user_reminder(&user.id, &self.reminder_id, ctx)
            .await
            .map_err(UseCaseError::Lookup)?;

        if reminder.status() == status {
            return Err(UseCaseError::StatusUnchanged(self.status.clone()));
        }

        reminder.set_status(status, ctx.sys.get_timestamp_millis());
        ctx.repos
            .reminder_configurations
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        match status {
            ReminderStatus::Inactive => {
                ctx.repos
                    .reminder_schedules
                    .delete_pending_by_reminder(&reminder.user_id, &reminder.id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
            ReminderStatus::Active => {
                let generate = GenerateReminderSchedulesUseCase {
                    user_id: reminder.user_id.clone(),
                    reminder_id: reminder.id.clone(),
                    trigger: GenerateReminderSchedulesTrigger::ReminderModified {
                        actor: self.actor.clone(),
                    },
                };
                execute(generate, ctx)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
        }

        Ok(ctx
            .repos
            .reminder_configurations
            .find(&reminder.id)
            .await
            .unwrap_or(reminder))
    }
}
