mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmsConfig, TwilioCredentials};
pub use repos::{
    DeleteResult, IReminderConfigurationRepo, IReminderScheduleRepo, ISmsLogRepo, IUserRepo,
    Repos,
};
pub use services::*;
use services::sms::{ISmsTransport, InMemorySmsTransport, TwilioSmsTransport};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct GuardianContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub sms: Arc<dyn ISmsTransport>,
}

impl GuardianContext {
    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = match &config.database_url {
            Some(connection_string) => Repos::create_postgres(connection_string).await?,
            None => Repos::create_inmemory(),
        };
        let sms: Arc<dyn ISmsTransport> = match &config.sms.twilio {
            Some(credentials) => Arc::new(TwilioSmsTransport::new(credentials.clone())),
            None => Arc::new(InMemorySmsTransport::new()),
        };
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            sms,
        })
    }

    /// Context backed by in-memory repositories and a recording SMS transport
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            sms: Arc::new(InMemorySmsTransport::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<GuardianContext> {
    GuardianContext::create(Config::new()).await
}

/// Runs the pending database migrations. Does nothing when the application
/// is configured to use in-memory storage.
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match std::env::var("DATABASE_URL") {
        Ok(connection_string) => connection_string,
        Err(_) => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
