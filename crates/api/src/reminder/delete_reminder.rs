use super::validation::{find_user_reminder, ReminderLookupError};
use crate::{
    error::GuardianError,
    shared::usecase::{execute, UseCase},
    user::{find_user, UserLookupError},
};
use actix_web::{web, HttpResponse};
use guardian_reminders_api_structs::delete_reminder::*;
use guardian_reminders_domain::{ReminderConfiguration, ID};
use guardian_reminders_infra::GuardianContext;
use tracing::info;

pub async fn delete_reminder_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<GuardianContext>,
) -> Result<HttpResponse, GuardianError> {
    let usecase = DeleteReminderUseCase {
        user_id: path_params.user_id.clone(),
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(GuardianError::from)
}

/// Soft deletes a reminder and purges its pending schedules
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
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
impl UseCase for DeleteReminderUseCase {
    type Response = ReminderConfiguration;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let user = find_user(&self.user_id, ctx).await.map_err(UseCaseError::User)?;
        let mut reminder = find_user_reminder(&user.id, &self.reminder_id, ctx)
            .await
            .map_err(UseCaseError::Lookup)?;

        reminder.soft_delete(ctx.sys.get_timestamp_millis());
        ctx.repos
            .reminder_configurations
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let purged = ctx
            .repos
            .reminder_schedules
            .delete_pending_by_reminder(&reminder.user_id, &reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        info!(
            "Deleted reminder {} and {} pending schedules",
            reminder.id, purged.deleted_count
        );

        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::{
        test_helpers::{create_reminder, reminder_input, setup_user},
        view_reminder::{UseCaseError as ViewReminderError, ViewReminderUseCase},
    };

    #[actix_web::main]
    #[test]
    async fn deleted_reminder_is_purged_and_hidden() {
        let (ctx, user) = setup_user("2024-01-09 12:00:00").await;
        let reminder = create_reminder(&ctx, &user, reminder_input("2024-01-10 09:00:00")).await;

        let usecase = DeleteReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.unwrap();
        assert!(deleted.is_deleted);
        assert!(!deleted.is_active);
        assert!(deleted.is_expired);

        assert!(ctx
            .repos
            .reminder_schedules
            .find_by_reminder(&reminder.id)
            .await
            .unwrap()
            .is_empty());

        let usecase = ViewReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(ViewReminderError::Lookup(ReminderLookupError::NotFound(_)))
        ));

        // Deleting twice reports an unknown reminder
        let usecase = DeleteReminderUseCase {
            user_id: user.id.clone(),
            reminder_id: reminder.id.clone(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::Lookup(ReminderLookupError::NotFound(_)))
        ));
    }
}
