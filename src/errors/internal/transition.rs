use thiserror::Error;

use crate::types::internal::RequestStatus;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Transition from {from} to {to} is not allowed")]
    NotAllowed {
        from: RequestStatus,
        to: RequestStatus,
    },
}
