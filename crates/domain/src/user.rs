use crate::shared::entity::{Entity, ID};

/// An enrollee under supervision. `Reminder`s are delivered to the
/// `cellphone` of the `User`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub cellphone: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created: i64,
}

impl User {
    pub fn new(cellphone: String, created: i64) -> Self {
        Self {
            id: Default::default(),
            cellphone,
            is_active: true,
            is_deleted: false,
            created,
        }
    }

    /// Normalizes a phone number to the digits it consists of
    pub fn sanitize_cellphone(cellphone: &str) -> Option<String> {
        let digits = cellphone
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>();
        if digits.len() < 7 || digits.len() > 15 {
            return None;
        }
        Some(digits)
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
