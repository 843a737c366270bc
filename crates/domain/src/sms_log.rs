use crate::shared::entity::{Entity, ID};

/// Audit record of an outbound SMS, written for every delivery attempt
#[derive(Debug, Clone, PartialEq)]
pub struct SmsLog {
    pub id: ID,
    pub user_id: ID,
    pub is_success: bool,
    pub from_number: String,
    pub to_number: String,
    pub message: String,
    pub error_message: Option<String>,
    pub created: i64,
}

impl Entity for SmsLog {
    fn id(&self) -> &ID {
        &self.id
    }
}
