use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::request;
use crate::types::internal::report::RequestWithBeneficiary;
use crate::types::internal::{Priority, RequestAction, RequestStatus};

/// Request creation form
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CreateRequestRequest {
    pub beneficiary_id: String,
    pub description: String,

    /// Defaults to Media
    pub priority: Option<Priority>,
}

/// Request edit form
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequestRequest {
    pub description: String,
    pub priority: Priority,

    /// New status; must be reachable from the current one
    pub status: Option<RequestStatus>,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResponse {
    pub id: String,
    pub beneficiary_id: String,
    pub beneficiary_name: Option<String>,
    pub description: String,
    pub status: RequestStatus,
    pub priority: Priority,

    /// Status actions legal from the current status
    pub available_actions: Vec<RequestAction>,

    /// Unix epoch milliseconds
    pub created_at: i64,

    /// Unix epoch milliseconds
    pub updated_at: i64,
}

impl RequestResponse {
    fn build(model: request::Model, beneficiary_name: Option<String>) -> Self {
        Self {
            available_actions: RequestAction::available_for(model.status),
            id: model.id,
            beneficiary_id: model.beneficiary_id,
            beneficiary_name,
            description: model.description,
            status: model.status,
            priority: model.priority,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<request::Model> for RequestResponse {
    fn from(model: request::Model) -> Self {
        Self::build(model, None)
    }
}

impl From<RequestWithBeneficiary> for RequestResponse {
    fn from(row: RequestWithBeneficiary) -> Self {
        let name = row.beneficiary_name().map(str::to_string);
        Self::build(row.request, name)
    }
}

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestListResponse {
    pub requests: Vec<RequestResponse>,
    pub total: u64,
}

/// Request detail page, including owner context
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDetailResponse {
    pub request: RequestResponse,
    pub beneficiary_disability_type: Option<String>,
    pub beneficiary_notes: Option<String>,
}

impl From<RequestWithBeneficiary> for RequestDetailResponse {
    fn from(row: RequestWithBeneficiary) -> Self {
        let (disability_type, notes) = row
            .beneficiary
            .as_ref()
            .map(|b| (b.disability_type.clone(), b.notes.clone()))
            .unwrap_or_default();

        Self {
            request: row.into(),
            beneficiary_disability_type: disability_type,
            beneficiary_notes: notes,
        }
    }
}
