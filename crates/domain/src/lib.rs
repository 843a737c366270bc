pub mod date;
mod reminder_configuration;
mod reminder_schedule;
mod shared;
mod sms_log;
mod user;

pub use reminder_configuration::{
    InvalidOffsetError, InvalidStatusError, ReminderConfiguration, ReminderListFilter,
    ReminderOffset, ReminderSettings, ReminderStatus,
};
pub use reminder_schedule::{ReminderSchedule, ReminderType, REMINDER_MESSAGE_PREFIX};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use sms_log::SmsLog;
pub use user::User;
