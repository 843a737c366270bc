use crate::{
    date::{DAY_MILLIS, HOUR_MILLIS, MINUTE_MILLIS},
    reminder_schedule::{ReminderSchedule, ReminderType},
    shared::entity::{Entity, ID},
};
use std::str::FromStr;
use thiserror::Error;

/// Lead time of one reminder channel.
///
/// `Absent` suppresses the channel. `Zero` is present and fires at the
/// event timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOffset {
    Absent,
    Zero,
    Before(u32),
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidOffsetError {
    #[error("Reminder offset can not be negative, got: {0}")]
    Negative(i64),
    #[error("Reminder offset: {0} is too large")]
    TooLarge(i64),
}

impl ReminderOffset {
    pub fn from_option(value: Option<i64>) -> Result<Self, InvalidOffsetError> {
        match value {
            None => Ok(Self::Absent),
            Some(0) => Ok(Self::Zero),
            Some(v) if v < 0 => Err(InvalidOffsetError::Negative(v)),
            Some(v) if v > u32::MAX as i64 => Err(InvalidOffsetError::TooLarge(v)),
            Some(v) => Ok(Self::Before(v as u32)),
        }
    }

    pub fn as_option(&self) -> Option<i64> {
        match self {
            Self::Absent => None,
            Self::Zero => Some(0),
            Self::Before(v) => Some(*v as i64),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

impl Default for ReminderOffset {
    fn default() -> Self {
        Self::Absent
    }
}

/// The editable part of a `ReminderConfiguration`
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSettings {
    pub title: String,
    pub text: String,
    /// Timestamp in millis of the moment the reminder concerns
    pub event_ts: i64,
    pub reminder_days: ReminderOffset,
    pub reminder_hours: ReminderOffset,
    pub reminder_minutes: ReminderOffset,
    pub send_event_reminder: bool,
}

impl ReminderSettings {
    /// At least one of the four channels must be enabled for the
    /// configuration to produce anything
    pub fn has_enabled_channel(&self) -> bool {
        self.send_event_reminder
            || self.reminder_days.is_present()
            || self.reminder_hours.is_present()
            || self.reminder_minutes.is_present()
    }
}

/// A `ReminderConfiguration` is the definition of a reminder a case manager
/// creates for a `User`. It owns the generation policy for the
/// `ReminderSchedule`s derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderConfiguration {
    pub id: ID,
    pub user_id: ID,
    /// The case manager that created this reminder
    pub created_by: Option<ID>,
    pub settings: ReminderSettings,
    pub is_active: bool,
    /// Every fire-time of this configuration has passed
    pub is_expired: bool,
    /// Soft delete flag, deleted configurations are never physically removed
    pub is_deleted: bool,
    /// Last time schedules were generated for this configuration
    pub last_executed_at: Option<i64>,
    pub created: i64,
    pub updated: i64,
}

impl ReminderConfiguration {
    pub fn new(user_id: ID, created_by: Option<ID>, settings: ReminderSettings, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            created_by,
            settings,
            is_active: true,
            is_expired: false,
            is_deleted: false,
            last_executed_at: None,
            created: now,
            updated: now,
        }
    }

    /// Replaces the editable settings. An edited configuration gets a new
    /// event time so it is no longer expired.
    pub fn update_settings(&mut self, settings: ReminderSettings, now: i64) {
        self.settings = settings;
        self.is_expired = false;
        self.updated = now;
    }

    pub fn set_status(&mut self, status: ReminderStatus, now: i64) {
        self.is_active = status == ReminderStatus::Active;
        self.updated = now;
    }

    pub fn status(&self) -> ReminderStatus {
        if self.is_active {
            ReminderStatus::Active
        } else {
            ReminderStatus::Inactive
        }
    }

    pub fn soft_delete(&mut self, now: i64) {
        self.is_deleted = true;
        self.is_active = false;
        self.is_expired = true;
        self.updated = now;
    }

    /// Only active, unexpired and undeleted configurations may generate
    /// `ReminderSchedule`s
    pub fn is_schedulable(&self) -> bool {
        !self.is_deleted && self.is_active && !self.is_expired
    }

    /// All fire-times are at or before the event, so once the event has
    /// passed nothing is left to send
    pub fn has_passed(&self, now: i64) -> bool {
        self.settings.event_ts < now
    }

    /// The concrete fire-times of every enabled channel, in channel order
    pub fn fire_times(&self) -> Vec<(ReminderType, i64)> {
        let event_ts = self.settings.event_ts;
        let mut fire_times = Vec::with_capacity(4);
        if self.settings.send_event_reminder {
            fire_times.push((ReminderType::Event, event_ts));
        }

        let channels = [
            (ReminderType::DaysBefore, self.settings.reminder_days, DAY_MILLIS),
            (
                ReminderType::HoursBefore,
                self.settings.reminder_hours,
                HOUR_MILLIS,
            ),
            (
                ReminderType::MinutesBefore,
                self.settings.reminder_minutes,
                MINUTE_MILLIS,
            ),
        ];
        for (reminder_type, offset, unit_millis) in channels.iter() {
            if let Some(units) = offset.as_option() {
                fire_times.push((*reminder_type, event_ts - units * unit_millis));
            }
        }

        fire_times
    }

    /// Creates the pending `ReminderSchedule`s of this configuration
    pub fn generate_schedules(&self) -> Vec<ReminderSchedule> {
        self.fire_times()
            .into_iter()
            .map(|(reminder_type, date_time)| ReminderSchedule {
                id: Default::default(),
                user_id: self.user_id.clone(),
                reminder_id: self.id.clone(),
                reminder_type,
                text: self.settings.text.clone(),
                date_time,
                is_executed: false,
                executed_at: None,
            })
            .collect()
    }

    pub fn matches_filter(&self, filter: ReminderListFilter) -> bool {
        if self.is_deleted {
            return false;
        }
        match filter {
            ReminderListFilter::All => true,
            ReminderListFilter::Active => self.is_active && !self.is_expired,
            ReminderListFilter::Inactive => !self.is_active,
            ReminderListFilter::Expired => self.is_expired,
        }
    }
}

impl Entity for ReminderConfiguration {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStatus {
    Active,
    Inactive,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidStatusError {
    #[error("Status: {0} is not a valid reminder status")]
    Unknown(String),
}

impl FromStr for ReminderStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" | "1" => Ok(Self::Active),
            "inactive" | "0" => Ok(Self::Inactive),
            _ => Err(InvalidStatusError::Unknown(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderListFilter {
    All,
    Active,
    Inactive,
    Expired,
}

impl Default for ReminderListFilter {
    fn default() -> Self {
        Self::All
    }
}

impl FromStr for ReminderListFilter {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "expired" => Ok(Self::Expired),
            _ => Err(InvalidStatusError::Unknown(s.to_string())),
        }
    }
}
