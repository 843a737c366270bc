use super::IReminderConfigurationRepo;
use crate::repos::shared::inmemory_repo::*;
use guardian_reminders_domain::{Entity, ReminderConfiguration, ID};

pub struct InMemoryReminderConfigurationRepo {
    reminders: std::sync::Mutex<Vec<ReminderConfiguration>>,
}

impl InMemoryReminderConfigurationRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderConfigurationRepo for InMemoryReminderConfigurationRepo {
    async fn insert(&self, reminder: &ReminderConfiguration) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &ReminderConfiguration) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<ReminderConfiguration> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<ReminderConfiguration> {
        find_by(&self.reminders, |r| r.user_id == *user_id)
    }

    async fn find_schedulable(
        &self,
        user_id: &ID,
        reminder_id: &ID,
    ) -> anyhow::Result<Option<ReminderConfiguration>> {
        Ok(find_by(&self.reminders, |r| {
            r.id() == reminder_id && r.user_id == *user_id && r.is_schedulable()
        })
        .into_iter()
        .next())
    }

    async fn find_pending_generation(
        &self,
        generated_before: i64,
    ) -> anyhow::Result<Vec<ReminderConfiguration>> {
        Ok(find_by(&self.reminders, |r| {
            r.is_schedulable()
                && r
                    .last_executed_at
                    .map(|ts| ts < generated_before)
                    .unwrap_or(true)
        }))
    }

    async fn set_last_executed_at(&self, reminder_id: &ID, timestamp: i64) -> anyhow::Result<()> {
        update_many(
            &self.reminders,
            |r| r.id() == reminder_id,
            |r| r.last_executed_at = Some(timestamp),
        );
        Ok(())
    }

    async fn expire_passed(&self, now: i64) -> anyhow::Result<Vec<ID>> {
        let expired = update_many(
            &self.reminders,
            |r| r.is_schedulable() && r.has_passed(now),
            |r| r.is_expired = true,
        );
        Ok(expired.into_iter().map(|r| r.id).collect())
    }
}
