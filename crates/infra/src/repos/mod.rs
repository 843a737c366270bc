mod reminder_configuration;
mod reminder_schedule;
mod shared;
mod sms_log;
mod user;

use reminder_configuration::{InMemoryReminderConfigurationRepo, PostgresReminderConfigurationRepo};
use reminder_schedule::{InMemoryReminderScheduleRepo, PostgresReminderScheduleRepo};
use sms_log::{InMemorySmsLogRepo, PostgresSmsLogRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use reminder_configuration::IReminderConfigurationRepo;
pub use reminder_schedule::IReminderScheduleRepo;
pub use shared::repo::DeleteResult;
pub use sms_log::ISmsLogRepo;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub reminder_configurations: Arc<dyn IReminderConfigurationRepo>,
    pub reminder_schedules: Arc<dyn IReminderScheduleRepo>,
    pub sms_logs: Arc<dyn ISmsLogRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            reminder_configurations: Arc::new(PostgresReminderConfigurationRepo::new(
                pool.clone(),
            )),
            reminder_schedules: Arc::new(PostgresReminderScheduleRepo::new(pool.clone())),
            sms_logs: Arc::new(PostgresSmsLogRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            reminder_configurations: Arc::new(InMemoryReminderConfigurationRepo::new()),
            reminder_schedules: Arc::new(InMemoryReminderScheduleRepo::new()),
            sms_logs: Arc::new(InMemorySmsLogRepo::new()),
        }
    }
}
