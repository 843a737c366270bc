use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. In-memory repositories are used when
    /// this is not set.
    pub database_url: Option<String>,
    /// How often the dispatcher sweeps for due `ReminderSchedule`s
    pub reminder_dispatch_interval_secs: u64,
    /// Trailing window of a dispatcher sweep. A `ReminderSchedule` whose
    /// fire-time is older than this when a sweep runs is never delivered.
    pub reminder_dispatch_window_millis: i64,
    /// How often the periodic schedule generation runs
    pub reminder_generation_interval_secs: u64,
    pub sms: SmsConfig,
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Number outbound SMS messages are sent from
    pub from_number: String,
    /// Prepended to the cellphone of the recipient
    pub country_code: String,
    /// Prepended to every message body, e.g. to mark staging environments
    pub message_prefix: String,
    pub twilio: Option<TwilioCredentials>,
}

#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let port = parse_env("PORT", 5000);
        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            info!(
                "Did not find DATABASE_URL environment variable. Going to use in-memory storage."
            );
        }
        let reminder_dispatch_window_minutes: i64 =
            parse_env("REMINDER_DISPATCH_WINDOW_MINUTES", 15);

        let twilio = match (
            std::env::var("TWILIO_ACCOUNT_SID"),
            std::env::var("TWILIO_AUTH_TOKEN"),
        ) {
            (Ok(account_sid), Ok(auth_token)) => Some(TwilioCredentials {
                account_sid,
                auth_token,
            }),
            _ => {
                warn!("Twilio credentials are not set. SMS reminders will not be delivered.");
                None
            }
        };

        Self {
            port,
            database_url,
            reminder_dispatch_interval_secs: parse_env("REMINDER_DISPATCH_INTERVAL_SECS", 5 * 60),
            reminder_dispatch_window_millis: reminder_dispatch_window_minutes * 60 * 1000,
            reminder_generation_interval_secs: parse_env(
                "REMINDER_GENERATION_INTERVAL_SECS",
                60 * 60,
            ),
            sms: SmsConfig {
                from_number: std::env::var("SMS_FROM_NUMBER").unwrap_or_default(),
                country_code: parse_env("SMS_COUNTRY_CODE", String::from("1")),
                message_prefix: std::env::var("SMS_MESSAGE_PREFIX").unwrap_or_default(),
                twilio,
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
