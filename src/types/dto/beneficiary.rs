use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::beneficiary;
use crate::types::dto::request::RequestResponse;

/// Registration and edit form for a beneficiary
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct BeneficiaryRequest {
    pub full_name: String,

    /// ISO date `YYYY-MM-DD`; empty for unknown
    pub birth_date: Option<String>,

    /// Disability category; empty or "ninguno" for none
    pub disability_type: Option<String>,

    pub notes: Option<String>,
}

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryResponse {
    pub id: String,
    pub full_name: String,

    /// ISO date `YYYY-MM-DD`
    pub birth_date: Option<String>,

    pub disability_type: Option<String>,
    pub notes: Option<String>,

    /// Unix epoch milliseconds
    pub created_at: i64,

    /// Unix epoch milliseconds
    pub updated_at: i64,
}

impl From<beneficiary::Model> for BeneficiaryResponse {
    fn from(model: beneficiary::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            birth_date: model.birth_date.map(|date| date.format("%Y-%m-%d").to_string()),
            disability_type: model.disability_type,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryListResponse {
    pub beneficiaries: Vec<BeneficiaryResponse>,
    pub total: u64,
}

/// Per-status request counts for one beneficiary
#[derive(Object, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestStatusSummary {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub delivered: u64,
}

/// Beneficiary detail page: the record, its requests and their summary
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryDetailResponse {
    pub beneficiary: BeneficiaryResponse,
    pub requests: Vec<RequestResponse>,
    pub summary: RequestStatusSummary,
}
