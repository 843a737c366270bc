use serde::{Deserialize, Serialize};

/// Body of every unsuccessful response. `code` is the numeric error code of
/// the failure, e.g. `408` for an unknown reminder.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct APIErrorResponse {
    pub code: u16,
    pub message: String,
}
