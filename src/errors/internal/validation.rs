use thiserror::Error;

use super::InternalError;

/// Form input rejected before any write
///
/// Messages are shown to the council operator as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{message}")]
    MissingField { field: String, message: String },

    #[error("{message}")]
    InvalidField { field: String, message: String },

    /// Several rules failed at once (sign-up reports them together)
    #[error("{}", .0.join(", "))]
    Multiple(Vec<String>),
}

impl ValidationError {
    pub fn missing(field: &str, message: &str) -> InternalError {
        InternalError::Validation(Self::MissingField {
            field: field.to_owned(),
            message: message.to_owned(),
        })
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> InternalError {
        InternalError::Validation(Self::InvalidField {
            field: field.to_owned(),
            message: message.into(),
        })
    }
}
