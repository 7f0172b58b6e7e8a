use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Standardized error response model
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error type or category
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Outcome of a form submission
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    /// Confirmation shown to the operator
    pub message: String,

    /// Path the UI navigates to next
    pub redirect_to: String,

    /// Identifier of the created or changed record, if any
    #[oai(skip_serializing_if_is_none)]
    pub id: Option<String>,
}

impl MutationResponse {
    pub fn new(message: &str, redirect_to: impl Into<String>, id: Option<String>) -> Self {
        Self {
            message: message.to_string(),
            redirect_to: redirect_to.into(),
            id,
        }
    }
}
