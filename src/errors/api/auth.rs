use crate::errors::internal::{CredentialError, InternalError};
use crate::types::dto::common::ErrorResponse;
use poem_openapi::{ApiResponse, payload::Json};
use std::fmt;

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Current password is incorrect (for password change)
    #[oai(status = 401)]
    IncorrectPassword(Json<ErrorResponse>),

    /// Form input failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Username already exists
    #[oai(status = 409)]
    DuplicateUsername(Json<ErrorResponse>),

    /// Invalid or malformed session token
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// Session token has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

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

impl AuthError {
    /// Same response for unknown usernames and wrong passwords
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(body(
            "invalid_credentials",
            "Usuario o contraseña incorrectos",
            401,
        ))
    }

    pub fn incorrect_password() -> Self {
        AuthError::IncorrectPassword(body(
            "incorrect_password",
            "La contraseña actual es incorrecta",
            401,
        ))
    }

    pub fn validation_failed(message: String) -> Self {
        AuthError::ValidationFailed(body("validation_failed", message, 400))
    }

    pub fn duplicate_username() -> Self {
        AuthError::DuplicateUsername(body(
            "duplicate_username",
            "El nombre de usuario ya está en uso.",
            409,
        ))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(body("invalid_token", "Sesión inválida", 401))
    }

    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(body("expired_token", "La sesión ha expirado", 401))
    }

    /// Convert InternalError to AuthError
    ///
    /// This is the explicit conversion point from internal errors to API errors.
    /// Internal error details are logged but not exposed to clients.
    pub fn from_internal_error(err: InternalError) -> Self {
        match &err {
            InternalError::Database(inner) => {
                tracing::error!("Database error in auth operation: {}", inner);
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
            InternalError::Credential(CredentialError::InvalidCredentials) => {
                tracing::debug!("Invalid credentials attempt");
                Self::invalid_credentials()
            }
            InternalError::Credential(CredentialError::IncorrectPassword) => {
                tracing::debug!("Incorrect password for password change");
                Self::incorrect_password()
            }
            InternalError::Credential(CredentialError::DuplicateUsername(username)) => {
                tracing::warn!("Duplicate username attempt: {}", username);
                Self::duplicate_username()
            }
            InternalError::Credential(CredentialError::ExpiredToken) => {
                tracing::debug!("Expired session token");
                Self::expired_token()
            }
            InternalError::Credential(
                CredentialError::InvalidToken { .. } | CredentialError::MissingSession,
            ) => {
                tracing::debug!("Rejected session: {}", err);
                Self::invalid_token()
            }
            // The session outlived its user
            InternalError::NotFound(not_found) => {
                tracing::warn!("Session refers to a missing record: {}", not_found);
                Self::invalid_token()
            }
            InternalError::Transition(_) => {
                tracing::error!("Unexpected error in auth operation: {}", err);
                Self::internal_server_error()
            }
        }
    }

    /// Generic internal server error; never exposes internal details
    fn internal_server_error() -> Self {
        AuthError::InternalError(body("internal_error", "Ocurrió un error interno", 500))
    }

    fn response(&self) -> &ErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::IncorrectPassword(json)
            | AuthError::ValidationFailed(json)
            | AuthError::DuplicateUsername(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        self.response().message.clone()
    }

    pub fn status_code(&self) -> u16 {
        self.response().status_code
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        Self::from_internal_error(err)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
