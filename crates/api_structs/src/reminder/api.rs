use crate::dtos::{ReminderConfigurationDTO, ReminderScheduleDTO};
use guardian_reminders_domain::{ReminderConfiguration, ReminderSchedule, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderConfigurationDTO,
}

impl ReminderResponse {
    pub fn new(reminder: ReminderConfiguration) -> Self {
        Self {
            reminder: ReminderConfigurationDTO::new(reminder),
        }
    }
}

/// Body shared by create and edit. Every field is optional on the wire so
/// that a missing value is reported with its own error code.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequestBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC)
    #[serde(default)]
    pub event_datetime: Option<String>,
    #[serde(default)]
    pub reminder_days: Option<i64>,
    #[serde(default)]
    pub reminder_hours: Option<i64>,
    #[serde(default)]
    pub reminder_minutes: Option<i64>,
    #[serde(default)]
    pub send_event_reminder: bool,
}

pub mod create_reminder {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    pub type RequestBody = ReminderRequestBody;

    pub type APIResponse = ReminderResponse;
}

pub mod edit_reminder {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub reminder_id: ID,
    }

    pub type RequestBody = ReminderRequestBody;

    pub type APIResponse = ReminderResponse;
}

pub mod view_reminder {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderConfigurationDTO,
        /// Every generated fire-time of the reminder, executed or not
        pub schedules: Vec<ReminderScheduleDTO>,
    }

    impl APIResponse {
        pub fn new(reminder: ReminderConfiguration, mut schedules: Vec<ReminderSchedule>) -> Self {
            schedules.sort_by_key(|s| s.date_time);
            Self {
                reminder: ReminderConfigurationDTO::new(reminder),
                schedules: schedules.into_iter().map(ReminderScheduleDTO::new).collect(),
            }
        }
    }
}

pub mod delete_reminder {
    use super::*;

    /// Code of a successful deletion
    pub const DELETED_CODE: u16 = 205;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub code: u16,
        pub reminder: ReminderConfigurationDTO,
    }

    impl APIResponse {
        pub fn new(reminder: ReminderConfiguration) -> Self {
            Self {
                code: DELETED_CODE,
                reminder: ReminderConfigurationDTO::new(reminder),
            }
        }
    }
}

pub mod change_reminder_status {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
        pub reminder_id: ID,
        /// `active` or `inactive`
        pub status: String,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod list_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        /// `all`, `active`, `inactive` or `expired`. Defaults to `all`.
        #[serde(default)]
        pub status: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub reminders: Vec<ReminderConfigurationDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<ReminderConfiguration>) -> Self {
            Self {
                reminders: reminders
                    .into_iter()
                    .map(ReminderConfigurationDTO::new)
                    .collect(),
            }
        }
    }
}
