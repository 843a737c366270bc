use crate::shared::usecase::UseCase;
use guardian_reminders_domain::{ReminderSchedule, ID};
use guardian_reminders_infra::GuardianContext;
use tracing::{error, info};

/// Computes the fire-times of a `ReminderConfiguration` and replaces its
/// pending `ReminderSchedule`s with them
#[derive(Debug)]
pub struct GenerateReminderSchedulesUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub trigger: GenerateReminderSchedulesTrigger,
}

#[derive(Debug)]
pub enum GenerateReminderSchedulesTrigger {
    /// A case manager created, edited or re-activated the reminder
    ReminderModified { actor: Option<ID> },
    /// Periodic job scheduler regenerating reminders that are due
    JobScheduler,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GenerateReminderSchedulesUseCase {
    /// The inserted schedules
    type Response = Vec<ReminderSchedule>;

    type Error = UseCaseError;

    const NAME: &'static str = "GenerateReminderSchedules";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx
            .repos
            .reminder_configurations
            .find_schedulable(&self.user_id, &self.reminder_id)
            .await
            .map_err(|e| {
                error!("Unable to find reminder {}. Err: {:?}", self.reminder_id, e);
                UseCaseError::StorageError
            })? {
            Some(reminder) => reminder,
            None => {
                info!(
                    "Reminder {} of user {} is not schedulable, nothing to generate",
                    self.reminder_id, self.user_id
                );
                return Ok(Vec::new());
            }
        };
        info!(
            "Generating schedules of reminder {}. Trigger: {:?}",
            reminder.id, self.trigger
        );

        // Fire-times that were already delivered are not inserted again
        let schedules = ctx
            .repos
            .reminder_schedules
            .replace_pending(&reminder.user_id, &reminder.id, &reminder.generate_schedules())
            .await
            .map_err(|e| {
                error!(
                    "Unable to replace schedules of reminder {}. Err: {:?}",
                    reminder.id, e
                );
                UseCaseError::StorageError
            })?;

        ctx.repos
            .reminder_configurations
            .set_last_executed_at(&reminder.id, ctx.sys.get_timestamp_millis())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(schedules)
    }
}
