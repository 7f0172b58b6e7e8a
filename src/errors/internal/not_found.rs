use thiserror::Error;

use super::InternalError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Beneficiary not found: {id}")]
    Beneficiary { id: String },

    #[error("Request not found: {id}")]
    Request { id: String },

    #[error("User ID not found: {user_id}")]
    User { user_id: String },
}

impl NotFoundError {
    pub fn beneficiary(id: &str) -> InternalError {
        InternalError::NotFound(Self::Beneficiary { id: id.to_owned() })
    }

    pub fn request(id: &str) -> InternalError {
        InternalError::NotFound(Self::Request { id: id.to_owned() })
    }

    pub fn user(user_id: &str) -> InternalError {
        InternalError::NotFound(Self::User {
            user_id: user_id.to_owned(),
        })
    }
}
