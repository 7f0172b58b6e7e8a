use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::dto::request::RequestResponse;
use crate::types::internal::report::{GroupCount, ReportData, percentage};
use crate::types::internal::{Priority, ReportFilter, RequestStatus};

/// One slice of the status chart
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusGroup {
    pub status: RequestStatus,
    pub count: u64,

    /// Share of the filtered total, 0-100
    pub percentage: f64,

    /// Chart colour (hex)
    pub color: String,
}

/// One slice of the priority chart
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityGroup {
    pub priority: Priority,
    pub count: u64,
    pub percentage: f64,
    pub color: String,
}

#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisabilityGroup {
    pub disability_type: String,
    pub count: u64,
}

/// Filtered management report
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub status_filter: Option<RequestStatus>,
    pub priority_filter: Option<Priority>,

    /// All beneficiaries, regardless of filters
    pub total_beneficiaries: u64,

    /// Requests matching the filters
    pub total_requests: u64,

    /// Approved share of `total_requests`, rounded percent
    pub approval_rate: u32,

    pub pending_requests: u64,
    pub by_status: Vec<StatusGroup>,
    pub by_priority: Vec<PriorityGroup>,
    pub beneficiaries_by_disability: Vec<DisabilityGroup>,
    pub recent_requests: Vec<RequestResponse>,
}

impl ReportResponse {
    pub fn new(filter: &ReportFilter, data: ReportData) -> Self {
        let total = data.total_requests;
        Self {
            status_filter: filter.status,
            priority_filter: filter.priority,
            total_beneficiaries: data.total_beneficiaries,
            total_requests: total,
            approval_rate: data.approval_rate(),
            pending_requests: data.status_count(RequestStatus::Pending),
            by_status: status_groups(&data.by_status, total),
            by_priority: data
                .by_priority
                .iter()
                .map(|group| PriorityGroup {
                    priority: group.key,
                    count: group.count,
                    percentage: percentage(group.count, total),
                    color: group.key.color().to_string(),
                })
                .collect(),
            beneficiaries_by_disability: data
                .beneficiaries_by_disability
                .into_iter()
                .map(|group| DisabilityGroup {
                    disability_type: group.key,
                    count: group.count,
                })
                .collect(),
            recent_requests: data.recent_requests.into_iter().map(Into::into).collect(),
        }
    }
}

/// Dashboard landing page
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub total_beneficiaries: u64,
    pub total_requests: u64,
    pub by_status: Vec<StatusGroup>,
    pub recent_requests: Vec<RequestResponse>,
}

impl From<ReportData> for DashboardResponse {
    fn from(data: ReportData) -> Self {
        Self {
            total_beneficiaries: data.total_beneficiaries,
            total_requests: data.total_requests,
            by_status: status_groups(&data.by_status, data.total_requests),
            recent_requests: data.recent_requests.into_iter().map(Into::into).collect(),
        }
    }
}

fn status_groups(groups: &[GroupCount<RequestStatus>], total: u64) -> Vec<StatusGroup> {
    groups
        .iter()
        .map(|group| StatusGroup {
            status: group.key,
            count: group.count,
            percentage: percentage(group.count, total),
            color: group.key.color().to_string(),
        })
        .collect()
}
