use crate::error::GuardianError;
use actix_web::HttpRequest;
use guardian_reminders_domain::ID;

/// Header identifying the case manager performing the request
pub const ACTOR_HEADER: &str = "guardian-actor";

/// Reads the optional acting case manager from the request headers
pub fn get_actor(req: &HttpRequest) -> Result<Option<ID>, GuardianError> {
    let header = match req.headers().get(ACTOR_HEADER) {
        Some(header) => header,
        None => return Ok(None),
    };
    header
        .to_str()
        .ok()
        .and_then(|value| value.parse::<ID>().ok())
        .map(Some)
        .ok_or_else(|| {
            GuardianError::BadClientData(format!(
                "The `{}` header must be a valid id",
                ACTOR_HEADER
            ))
        })
}
