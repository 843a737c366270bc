use serde::{Deserialize, Serialize};

/// Liveness check of the server
pub mod get_service_health {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub message: String,
    }
}
