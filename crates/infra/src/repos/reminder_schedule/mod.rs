mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderScheduleRepo;
pub use postgres::PostgresReminderScheduleRepo;

use crate::repos::shared::repo::DeleteResult;
use guardian_reminders_domain::{ReminderSchedule, ID};

#[async_trait::async_trait]
pub trait IReminderScheduleRepo: Send + Sync {
    /// Atomically deletes the unexecuted schedules of a `ReminderConfiguration`
    /// and inserts the given schedules as a single batch. A schedule whose
    /// `(reminder_type, date_time)` was already executed is not inserted.
    /// Returns the inserted schedules.
    async fn replace_pending(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        schedules: &[ReminderSchedule],
    ) -> anyhow::Result<Vec<ReminderSchedule>>;
    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>>;
    /// Unexecuted schedules with a fire-time within `[from, to]`
    async fn find_due(&self, from: i64, to: i64) -> anyhow::Result<Vec<ReminderSchedule>>;
    /// Marks the schedule as executed only if it is currently unexecuted.
    /// Returns `None` when another sweep already claimed it or it was deleted.
    async fn claim(
        &self,
        schedule_id: &ID,
        executed_at: i64,
    ) -> anyhow::Result<Option<ReminderSchedule>>;
    /// Deletes the unexecuted schedules of a `ReminderConfiguration`
    async fn delete_pending_by_reminder(
        &self,
        user_id: &ID,
        reminder_id: &ID,
    ) -> anyhow::Result<DeleteResult>;
}
