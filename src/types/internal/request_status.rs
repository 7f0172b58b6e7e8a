use std::fmt;

use poem_openapi::Enum;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::internal::TransitionError;

/// Lifecycle stage of an aid request
///
/// Persisted and serialized with the Spanish labels the council uses.
///
/// ```text
/// Pendiente ──approve──▶ Aprobada ──deliver──▶ Entregada
///     │  ▲                  │
///     │  └──────reopen──────┘
///   reject
///     ▼
/// Rechazada ──reopen──▶ Pendiente
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Enum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RequestStatus {
    #[default]
    #[sea_orm(string_value = "Pendiente")]
    #[oai(rename = "Pendiente")]
    #[serde(rename = "Pendiente")]
    Pending,

    #[sea_orm(string_value = "Aprobada")]
    #[oai(rename = "Aprobada")]
    #[serde(rename = "Aprobada")]
    Approved,

    #[sea_orm(string_value = "Rechazada")]
    #[oai(rename = "Rechazada")]
    #[serde(rename = "Rechazada")]
    Rejected,

    #[sea_orm(string_value = "Entregada")]
    #[oai(rename = "Entregada")]
    #[serde(rename = "Entregada")]
    Delivered,
}

impl RequestStatus {
    /// Every status in display order
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pendiente",
            RequestStatus::Approved => "Aprobada",
            RequestStatus::Rejected => "Rechazada",
            RequestStatus::Delivered => "Entregada",
        }
    }

    /// Statuses reachable from this one in a single step
    pub fn allowed_transitions(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Pending => &[RequestStatus::Approved, RequestStatus::Rejected],
            RequestStatus::Approved => &[RequestStatus::Delivered, RequestStatus::Pending],
            RequestStatus::Rejected => &[RequestStatus::Pending],
            RequestStatus::Delivered => &[],
        }
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Validate a move to `next`
    ///
    /// # Errors
    ///
    /// Returns `TransitionError::NotAllowed` for any move missing from the
    /// transition table, including staying on the same status.
    pub fn transition_to(&self, next: RequestStatus) -> Result<RequestStatus, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError::NotAllowed { from: *self, to: next })
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Chart colour used by the dashboard
    pub fn color(&self) -> &'static str {
        match self {
            RequestStatus::Approved => "#10B981",
            RequestStatus::Pending => "#F59E0B",
            RequestStatus::Rejected => "#EF4444",
            RequestStatus::Delivered => "#3B82F6",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named status-management actions offered on the request detail view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Enum, Serialize, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    /// Pendiente → Aprobada
    Approve,
    /// Pendiente → Rechazada
    Reject,
    /// Aprobada → Entregada
    Deliver,
    /// Aprobada or Rechazada → Pendiente
    Reopen,
}

impl RequestAction {
    pub fn target(&self) -> RequestStatus {
        match self {
            RequestAction::Approve => RequestStatus::Approved,
            RequestAction::Reject => RequestStatus::Rejected,
            RequestAction::Deliver => RequestStatus::Delivered,
            RequestAction::Reopen => RequestStatus::Pending,
        }
    }

    /// Actions the UI should offer for a request in `status`
    pub fn available_for(status: RequestStatus) -> Vec<RequestAction> {
        [
            RequestAction::Approve,
            RequestAction::Reject,
            RequestAction::Deliver,
            RequestAction::Reopen,
        ]
        .into_iter()
        .filter(|action| status.can_transition_to(action.target()))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_be_approved_or_rejected() {
        assert_eq!(
            RequestStatus::Pending.transition_to(RequestStatus::Approved),
            Ok(RequestStatus::Approved)
        );
        assert_eq!(
            RequestStatus::Pending.transition_to(RequestStatus::Rejected),
            Ok(RequestStatus::Rejected)
        );
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Delivered));
    }

    #[test]
    fn test_approved_can_be_delivered_or_reverted() {
        assert!(RequestStatus::Approved.can_transition_to(RequestStatus::Delivered));
        assert!(RequestStatus::Approved.can_transition_to(RequestStatus::Pending));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
    }

    #[test]
    fn test_rejected_can_only_be_reopened() {
        assert_eq!(RequestStatus::Rejected.allowed_transitions(), &[RequestStatus::Pending]);
    }

    #[test]
    fn test_delivered_is_terminal() {
        assert!(RequestStatus::Delivered.is_terminal());
        for next in RequestStatus::ALL {
            assert_eq!(
                RequestStatus::Delivered.transition_to(next),
                Err(TransitionError::NotAllowed {
                    from: RequestStatus::Delivered,
                    to: next,
                })
            );
        }
    }

    #[test]
    fn test_same_status_is_not_a_transition() {
        for status in RequestStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_actions_follow_transition_table() {
        assert_eq!(
            RequestAction::available_for(RequestStatus::Pending),
            vec![RequestAction::Approve, RequestAction::Reject]
        );
        assert_eq!(
            RequestAction::available_for(RequestStatus::Approved),
            vec![RequestAction::Deliver, RequestAction::Reopen]
        );
        assert_eq!(
            RequestAction::available_for(RequestStatus::Rejected),
            vec![RequestAction::Reopen]
        );
        assert!(RequestAction::available_for(RequestStatus::Delivered).is_empty());
    }

    #[test]
    fn test_spanish_wire_values() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Delivered).unwrap(),
            "\"Entregada\""
        );
        let parsed: RequestStatus = serde_json::from_str("\"Rechazada\"").unwrap();
        assert_eq!(parsed, RequestStatus::Rejected);
        assert_eq!(RequestStatus::Approved.to_value(), "Aprobada");
    }
}
