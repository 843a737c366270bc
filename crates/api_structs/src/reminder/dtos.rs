use guardian_reminders_domain::{
    date::format_millis, ReminderConfiguration, ReminderSchedule, ReminderType, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderConfigurationDTO {
    pub id: ID,
    pub user_id: ID,
    pub created_by: Option<ID>,
    pub title: String,
    pub text: String,
    pub event_ts: i64,
    /// `event_ts` formatted as `YYYY-MM-DD HH:MM:SS` in UTC
    pub event_datetime: String,
    pub reminder_days: Option<i64>,
    pub reminder_hours: Option<i64>,
    pub reminder_minutes: Option<i64>,
    pub send_event_reminder: bool,
    pub is_active: bool,
    pub is_expired: bool,
    pub last_executed_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl ReminderConfigurationDTO {
    pub fn new(reminder: ReminderConfiguration) -> Self {
        let settings = reminder.settings;
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            created_by: reminder.created_by,
            title: settings.title,
            text: settings.text,
            event_ts: settings.event_ts,
            event_datetime: format_millis(settings.event_ts),
            reminder_days: settings.reminder_days.as_option(),
            reminder_hours: settings.reminder_hours.as_option(),
            reminder_minutes: settings.reminder_minutes.as_option(),
            send_event_reminder: settings.send_event_reminder,
            is_active: reminder.is_active,
            is_expired: reminder.is_expired,
            last_executed_at: reminder.last_executed_at,
            created: reminder.created,
            updated: reminder.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderScheduleDTO {
    pub id: ID,
    pub reminder_type: ReminderType,
    pub text: String,
    pub date_time: i64,
    pub is_executed: bool,
    pub executed_at: Option<i64>,
}

impl ReminderScheduleDTO {
    pub fn new(schedule: ReminderSchedule) -> Self {
        Self {
            id: schedule.id,
            reminder_type: schedule.reminder_type,
            text: schedule.text,
            date_time: schedule.date_time,
            is_executed: schedule.is_executed,
            executed_at: schedule.executed_at,
        }
    }
}
