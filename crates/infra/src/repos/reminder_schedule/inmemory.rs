use super::IReminderScheduleRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use guardian_reminders_domain::{Entity, ReminderSchedule, ID};
use std::collections::HashSet;

pub struct InMemoryReminderScheduleRepo {
    schedules: std::sync::Mutex<Vec<ReminderSchedule>>,
}

impl InMemoryReminderScheduleRepo {
    pub fn new() -> Self {
        Self {
            schedules: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderScheduleRepo for InMemoryReminderScheduleRepo {
    async fn replace_pending(
        &self,
        user_id: &ID,
        reminder_id: &ID,
        schedules: &[ReminderSchedule],
    ) -> anyhow::Result<Vec<ReminderSchedule>> {
        // Purge and insert under one lock so that generations can not interleave
        let mut stored = self.schedules.lock().unwrap();
        stored.retain(|s| {
            s.is_executed || s.user_id != *user_id || s.reminder_id != *reminder_id
        });
        let executed = stored
            .iter()
            .filter(|s| s.is_executed && s.reminder_id == *reminder_id)
            .map(|s| (s.reminder_type, s.date_time))
            .collect::<HashSet<_>>();
        let inserted = schedules
            .iter()
            .filter(|s| !executed.contains(&(s.reminder_type, s.date_time)))
            .cloned()
            .collect::<Vec<_>>();
        stored.extend_from_slice(&inserted);
        Ok(inserted)
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Vec<ReminderSchedule>> {
        Ok(find_by(&self.schedules, |s| s.reminder_id == *reminder_id))
    }

    async fn find_due(&self, from: i64, to: i64) -> anyhow::Result<Vec<ReminderSchedule>> {
        Ok(find_by(&self.schedules, |s| {
            !s.is_executed && s.date_time >= from && s.date_time <= to
        }))
    }

    async fn claim(
        &self,
        schedule_id: &ID,
        executed_at: i64,
    ) -> anyhow::Result<Option<ReminderSchedule>> {
        Ok(update_first_by(
            &self.schedules,
            |s| s.id() == schedule_id && !s.is_executed,
            |s| {
                s.is_executed = true;
                s.executed_at = Some(executed_at);
            },
        ))
    }

    async fn delete_pending_by_reminder(
        &self,
        user_id: &ID,
        reminder_id: &ID,
    ) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.schedules, |s| {
            s.user_id == *user_id && s.reminder_id == *reminder_id && !s.is_executed
        }))
    }
}
