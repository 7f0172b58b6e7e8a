use thiserror::Error;

pub mod credential;
pub mod database;
pub mod not_found;
pub mod transition;
pub mod validation;

pub use credential::CredentialError;
pub use database::DatabaseError;
pub use not_found::NotFoundError;
pub use transition::TransitionError;
pub use validation::ValidationError;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure errors (Database, Parse, Crypto) are shared by every layer;
/// domain errors carry the user-facing taxonomy. Not exposed via API:
/// endpoints convert to `AuthError` or `ManagementError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse {
        value_type: String,
        message: String,
    },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto {
        operation: String,
        message: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl InternalError {
    /// Create a database error with context
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    /// Create a parse error with context
    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    /// Create a crypto error with context
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
