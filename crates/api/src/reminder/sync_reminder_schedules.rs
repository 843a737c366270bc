use super::generate_reminder_schedules::{
    GenerateReminderSchedulesTrigger, GenerateReminderSchedulesUseCase,
};
use crate::shared::usecase::{execute, UseCase};
use guardian_reminders_domain::date::start_of_day_millis;
use guardian_reminders_infra::GuardianContext;
use tracing::{error, info};

/// Periodic maintenance of the `ReminderConfiguration`s: expires the ones
/// whose event has passed and regenerates the schedules of those that have
/// not been generated today
#[derive(Debug)]
pub struct SyncReminderSchedulesUseCase;

#[derive(Debug, Default, PartialEq)]
pub struct SyncReminderSchedulesSummary {
    pub expired: usize,
    pub generated: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SyncReminderSchedulesUseCase {
    type Response = SyncReminderSchedulesSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncReminderSchedules";

    async fn execute(&mut self, ctx: &GuardianContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let expired = ctx
            .repos
            .reminder_configurations
            .expire_passed(now)
            .await
            .map_err(|e| {
                error!("Unable to expire passed reminders. Err: {:?}", e);
                UseCaseError::StorageError
            })?;

        let pending = ctx
            .repos
            .reminder_configurations
            .find_pending_generation(start_of_day_millis(now))
            .await
            .map_err(|e| {
                error!("Unable to find reminders pending generation. Err: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut summary = SyncReminderSchedulesSummary {
            expired: expired.len(),
            generated: 0,
        };
        for reminder in pending {
            let usecase = GenerateReminderSchedulesUseCase {
                user_id: reminder.user_id,
                reminder_id: reminder.id,
                trigger: GenerateReminderSchedulesTrigger::JobScheduler,
            };
            // One failing reminder should not stop the others
            if execute(usecase, ctx).await.is_ok() {
                summary.generated += 1;
            }
        }

        info!("Reminder schedules synced: {:?}", summary);

        Ok(summary)
    }
}
