use chrono::{Duration, Utc};
use guardian_reminders_sdk::{CreateUserInput, GuardianSDK, ReminderInput, User};

/// `YYYY-MM-DD HH:MM:SS` of the given number of days from now
pub fn datetime_in_days(days: i64) -> String {
    (Utc::now() + Duration::days(days))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

pub async fn create_user(sdk: &GuardianSDK) -> User {
    sdk.user
        .create(CreateUserInput {
            cellphone: "555-123-4567".into(),
        })
        .await
        .expect("Expected to create user")
        .user
}

/// Reminder one day before and at an event three days from now
pub fn reminder_input() -> ReminderInput {
    ReminderInput {
        title: Some("Court date".into()),
        text: Some("Appear at the county court".into()),
        event_datetime: Some(datetime_in_days(3)),
        reminder_days: Some(1),
        reminder_hours: None,
        reminder_minutes: None,
        send_event_reminder: true,
    }
}
