mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderConfigurationRepo;
pub use postgres::PostgresReminderConfigurationRepo;

use guardian_reminders_domain::{ReminderConfiguration, ID};

#[async_trait::async_trait]
pub trait IReminderConfigurationRepo: Send + Sync {
    async fn insert(&self, reminder: &ReminderConfiguration) -> anyhow::Result<()>;
    async fn save(&self, reminder: &ReminderConfiguration) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<ReminderConfiguration>;
    /// Every configuration of the `User`, including deleted ones
    async fn find_by_user(&self, user_id: &ID) -> Vec<ReminderConfiguration>;
    /// Finds the configuration if it belongs to the `User` and is active,
    /// unexpired and not deleted
    async fn find_schedulable(
        &self,
        user_id: &ID,
        reminder_id: &ID,
    ) -> anyhow::Result<Option<ReminderConfiguration>>;
    /// Schedulable configurations that have not generated schedules since `generated_before`
    async fn find_pending_generation(
        &self,
        generated_before: i64,
    ) -> anyhow::Result<Vec<ReminderConfiguration>>;
    async fn set_last_executed_at(&self, reminder_id: &ID, timestamp: i64) -> anyhow::Result<()>;
    /// Marks active configurations whose event is before `now` as expired
    /// and returns their ids
    async fn expire_passed(&self, now: i64) -> anyhow::Result<Vec<ID>>;
}
