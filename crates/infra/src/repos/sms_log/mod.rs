mod inmemory;
mod postgres;

pub use inmemory::InMemorySmsLogRepo;
pub use postgres::PostgresSmsLogRepo;

use guardian_reminders_domain::{SmsLog, ID};

#[async_trait::async_trait]
pub trait ISmsLogRepo: Send + Sync {
    async fn insert(&self, log: &SmsLog) -> anyhow::Result<()>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<SmsLog>;
}
