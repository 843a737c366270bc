use actix_web::{http::StatusCode, HttpResponse};
use guardian_reminders_api_structs::APIErrorResponse;
use guardian_reminders_domain::ID;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardianError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("A user with id: {0}, was not found.")]
    UserNotFound(ID),
    #[error("A reminder with id: {0}, was not found.")]
    ReminderNotFound(ID),
    #[error("Title and text of the reminder must be provided")]
    MissingReminderContent,
    #[error("Event datetime: `{0}` could not be parsed")]
    InvalidEventDateTime(String),
    #[error("Event datetime: `{0}` is in the past")]
    EventInPast(String),
    #[error("Invalid reminder channels. Error message: `{0}`")]
    InvalidReminderChannels(String),
    #[error("`{0}` is not a valid reminder status")]
    InvalidReminderStatus(String),
    #[error("The reminder with id: {0}, belongs to another user.")]
    ReminderNotOwned(ID),
    #[error("The reminder already has the status: `{0}`")]
    ReminderStatusUnchanged(String),
}

impl GuardianError {
    /// Numeric code reported to clients in the error body
    pub fn code(&self) -> u16 {
        match self {
            Self::InternalError => 500,
            Self::BadClientData(_) => 400,
            Self::UserNotFound(_) => 402,
            Self::ReminderNotFound(_) => 408,
            Self::MissingReminderContent => 660,
            Self::InvalidEventDateTime(_) => 661,
            Self::EventInPast(_) => 662,
            Self::InvalidReminderChannels(_) => 663,
            Self::InvalidReminderStatus(_) => 664,
            Self::ReminderNotOwned(_) => 665,
            Self::ReminderStatusUnchanged(_) => 671,
        }
    }
}

impl actix_web::error::ResponseError for GuardianError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UserNotFound(_) | Self::ReminderNotFound(_) => StatusCode::NOT_FOUND,
            Self::ReminderNotOwned(_) => StatusCode::FORBIDDEN,
            Self::ReminderStatusUnchanged(_) => StatusCode::CONFLICT,
            Self::BadClientData(_)
            | Self::MissingReminderContent
            | Self::InvalidEventDateTime(_)
            | Self::EventInPast(_)
            | Self::InvalidReminderChannels(_)
            | Self::InvalidReminderStatus(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(APIErrorResponse {
            code: self.code(),
            message: self.to_string(),
        })
    }
}
