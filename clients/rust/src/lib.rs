mod base;
mod reminder;
mod status;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use guardian_reminders_api_structs::dtos::*;
pub use guardian_reminders_domain::{ReminderType, ID};
pub use reminder::{
    ChangeReminderStatusInput, CreateReminderInput, EditReminderInput, ListRemindersInput,
    ReminderInput,
};
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;
pub use user::CreateUserInput;
use user::UserClient;

// Domain
pub use guardian_reminders_api_structs::dtos::ReminderConfigurationDTO as Reminder;
pub use guardian_reminders_api_structs::dtos::ReminderScheduleDTO as ReminderSchedule;
pub use guardian_reminders_api_structs::dtos::UserDTO as User;

/// Guardian Reminders Server SDK
///
/// The SDK contains methods for interacting with the Guardian Reminders
/// server API.
#[derive(Clone)]
pub struct GuardianSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl GuardianSDK {
    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    /// Client that identifies every request with the given case manager
    pub fn new_with_actor(address: String, actor: ID) -> Self {
        let mut base = BaseClient::new(address);
        base.set_actor(actor.as_string());
        Self::create(base)
    }

    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            reminder,
            status,
            user,
        }
    }
}
