use guardian_reminders_domain::{User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub cellphone: String,
    pub is_active: bool,
    pub created: i64,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            cellphone: user.cellphone,
            is_active: user.is_active,
            created: user.created,
        }
    }
}
