use thiserror::Error;

/// Authentication and session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Unknown username or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Current password is incorrect (for password change)
    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("User already exists: {0}")]
    DuplicateUsername(String),

    #[error("No session on request")]
    MissingSession,

    #[error("Invalid session token: {reason}")]
    InvalidToken { reason: String },

    #[error("Expired session token")]
    ExpiredToken,
}

impl CredentialError {
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
