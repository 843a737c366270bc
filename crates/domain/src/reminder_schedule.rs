use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Text every delivered reminder starts with
pub const REMINDER_MESSAGE_PREFIX: &str = " Guardian Reminder: ";

/// Discriminates which channel of a `ReminderConfiguration` produced a
/// `ReminderSchedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderType {
    /// Fires at the event timestamp
    Event,
    DaysBefore,
    HoursBefore,
    MinutesBefore,
}

impl ReminderType {
    pub fn code(&self) -> i16 {
        match self {
            Self::Event => 1,
            Self::DaysBefore => 2,
            Self::HoursBefore => 3,
            Self::MinutesBefore => 4,
        }
    }
}

impl TryFrom<i16> for ReminderType {
    type Error = anyhow::Error;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Event),
            2 => Ok(Self::DaysBefore),
            3 => Ok(Self::HoursBefore),
            4 => Ok(Self::MinutesBefore),
            _ => Err(anyhow::Error::msg(format!(
                "Unknown reminder type: {}",
                code
            ))),
        }
    }
}

/// A `ReminderSchedule` is one concrete fire-time derived from a
/// `ReminderConfiguration`. The dispatcher flips `is_executed` when it
/// claims the row for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSchedule {
    pub id: ID,
    /// The `User` that should receive the reminder
    pub user_id: ID,
    /// The `ReminderConfiguration` this row was generated from
    pub reminder_id: ID,
    pub reminder_type: ReminderType,
    pub text: String,
    /// The timestamp in millis at which the reminder should be sent
    pub date_time: i64,
    pub is_executed: bool,
    pub executed_at: Option<i64>,
}

impl ReminderSchedule {
    /// Whether a sweep running at `now` with the given trailing window should
    /// attempt delivery. Rows older than the window are never delivered.
    pub fn is_due(&self, now: i64, window_millis: i64) -> bool {
        !self.is_executed && self.date_time >= now - window_millis && self.date_time <= now
    }

    pub fn notification_text(&self) -> String {
        format!("{}{}", REMINDER_MESSAGE_PREFIX, self.text)
    }
}

impl Entity for ReminderSchedule {
    fn id(&self) -> &ID {
        &self.id
    }
}
