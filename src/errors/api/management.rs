use crate::errors::internal::{CredentialError, InternalError, NotFoundError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Errors for beneficiary, request and report endpoints
#[derive(ApiResponse, Debug)]
pub enum ManagementError {
    /// Form input failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Missing, invalid or expired session
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Requested status change is not part of the request lifecycle
    #[oai(status = 409)]
    InvalidTransition(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

fn body(error: &str, message: impl Into<String>, status_code: u16) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    })
}

impl ManagementError {
    pub fn validation_failed(message: String) -> Self {
        ManagementError::ValidationFailed(body("validation_failed", message, 400))
    }

    pub fn unauthorized() -> Self {
        ManagementError::Unauthorized(body(
            "unauthorized",
            "Debe iniciar sesión para continuar",
            401,
        ))
    }

    pub fn not_found(entity: &str) -> Self {
        ManagementError::NotFound(body(
            "not_found",
            format!("{} no encontrado", entity),
            404,
        ))
    }

    pub fn invalid_transition(message: String) -> Self {
        ManagementError::InvalidTransition(body("invalid_transition", message, 409))
    }

    /// Convert InternalError to ManagementError
    ///
    /// Infrastructure failures are logged and collapsed into a generic 500.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(inner) => {
                tracing::error!("Database error in management operation: {}", inner);
                Self::internal_server_error()
            }
            InternalError::Parse { value_type, .. } => {
                tracing::error!("Parse error for {}: {}", value_type, err);
                Self::internal_server_error()
            }
            InternalError::Crypto { operation, .. } => {
                tracing::error!("Crypto error in {}: {}", operation, err);
                Self::internal_server_error()
            }
            InternalError::Validation(validation) => {
                tracing::debug!("Validation failed: {}", validation);
                Self::validation_failed(validation.to_string())
            }
            InternalError::NotFound(not_found) => {
                tracing::debug!("{}", not_found);
                match not_found {
                    NotFoundError::Beneficiary { .. } => Self::not_found("Beneficiario"),
                    NotFoundError::Request { .. } => Self::not_found("Solicitud"),
                    NotFoundError::User { .. } => Self::not_found("Usuario"),
                }
            }
            InternalError::Transition(transition) => {
                tracing::info!("Rejected status change: {}", transition);
                Self::invalid_transition(transition.to_string())
            }
            InternalError::Credential(
                CredentialError::MissingSession
                | CredentialError::ExpiredToken
                | CredentialError::InvalidToken { .. },
            ) => {
                tracing::debug!("Rejected session: {}", err);
                Self::unauthorized()
            }
            InternalError::Credential(_) => {
                tracing::error!("Unexpected error in management operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    fn internal_server_error() -> Self {
        ManagementError::InternalError(body("internal_error", "Ocurrió un error interno", 500))
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            ManagementError::ValidationFailed(json)
            | ManagementError::Unauthorized(json)
            | ManagementError::NotFound(json)
            | ManagementError::InvalidTransition(json)
            | ManagementError::InternalError(json) => &json.0,
        }
    }

    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for ManagementError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for ManagementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
