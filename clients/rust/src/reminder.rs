use crate::{APIResponse, BaseClient, ID};
use guardian_reminders_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub type ReminderInput = ReminderRequestBody;

pub struct CreateReminderInput {
    pub user_id: ID,
    pub reminder: ReminderInput,
}

pub struct EditReminderInput {
    pub user_id: ID,
    pub reminder_id: ID,
    pub reminder: ReminderInput,
}

pub struct ChangeReminderStatusInput {
    pub user_id: ID,
    pub reminder_id: ID,
    /// `active` or `inactive`
    pub status: String,
}

pub struct ListRemindersInput {
    pub user_id: ID,
    /// `all`, `active`, `inactive` or `expired`
    pub status: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        self.base
            .post(
                input.reminder,
                format!("user/{}/reminder", input.user_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn edit(&self, input: EditReminderInput) -> APIResponse<edit_reminder::APIResponse> {
        self.base
            .put(
                input.reminder,
                format!("user/{}/reminder/{}", input.user_id, input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get(
        &self,
        user_id: ID,
        reminder_id: ID,
    ) -> APIResponse<view_reminder::APIResponse> {
        self.base
            .get(
                format!("user/{}/reminder/{}", user_id, reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(
        &self,
        user_id: ID,
        reminder_id: ID,
    ) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(
                format!("user/{}/reminder/{}", user_id, reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn change_status(
        &self,
        input: ChangeReminderStatusInput,
    ) -> APIResponse<change_reminder_status::APIResponse> {
        self.base
            .put(
                (),
                format!(
                    "user/{}/reminder/{}/status/{}",
                    input.user_id, input.reminder_id, input.status
                ),
                StatusCode::OK,
            )
            .await
    }

    pub async fn list(
        &self,
        input: ListRemindersInput,
    ) -> APIResponse<list_reminders::APIResponse> {
        let path = match input.status {
            Some(status) => format!("user/{}/reminders?status={}", input.user_id, status),
            None => format!("user/{}/reminders", input.user_id),
        };
        self.base.get(path, StatusCode::OK).await
    }
}
