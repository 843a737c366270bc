use super::ISmsLogRepo;
use crate::repos::shared::inmemory_repo::*;
use guardian_reminders_domain::{SmsLog, ID};

pub struct InMemorySmsLogRepo {
    logs: std::sync::Mutex<Vec<SmsLog>>,
}

impl InMemorySmsLogRepo {
    pub fn new() -> Self {
        Self {
            logs: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ISmsLogRepo for InMemorySmsLogRepo {
    async fn insert(&self, log: &SmsLog) -> anyhow::Result<()> {
        insert(log, &self.logs);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<SmsLog> {
        find_by(&self.logs, |log| log.user_id == *user_id)
    }
}
