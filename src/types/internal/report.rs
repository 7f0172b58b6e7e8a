use sea_orm::{ColumnTrait, Condition};

use crate::types::db::{beneficiary, request};

use super::{Priority, RequestStatus};

/// Optional conjunctive filter applied to request aggregations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub status: Option<RequestStatus>,
    pub priority: Option<Priority>,
}

impl ReportFilter {
    pub fn new(status: Option<RequestStatus>, priority: Option<Priority>) -> Self {
        Self { status, priority }
    }

    /// `status = ? AND priority = ?`, omitting whichever side is absent
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(status) = self.status {
            condition = condition.add(request::Column::Status.eq(status));
        }
        if let Some(priority) = self.priority {
            condition = condition.add(request::Column::Priority.eq(priority));
        }
        condition
    }

    /// Stable query-string form used in cache keys
    pub fn cache_suffix(&self) -> String {
        format!(
            "status={}&priority={}",
            self.status.map(|s| s.as_str()).unwrap_or(""),
            self.priority.map(|p| p.as_str()).unwrap_or(""),
        )
    }
}

/// Count for one group of a count + group-by aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount<K> {
    pub key: K,
    pub count: u64,
}

/// A request row joined with its owning beneficiary
#[derive(Debug, Clone, PartialEq)]
pub struct RequestWithBeneficiary {
    pub request: request::Model,
    pub beneficiary: Option<beneficiary::Model>,
}

impl RequestWithBeneficiary {
    pub fn beneficiary_name(&self) -> Option<&str> {
        self.beneficiary.as_ref().map(|b| b.full_name.as_str())
    }
}

/// Raw output of the aggregation queries
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub total_beneficiaries: u64,
    pub total_requests: u64,
    pub by_status: Vec<GroupCount<RequestStatus>>,
    pub by_priority: Vec<GroupCount<Priority>>,
    pub recent_requests: Vec<RequestWithBeneficiary>,
    pub beneficiaries_by_disability: Vec<GroupCount<String>>,
}

impl ReportData {
    pub fn status_count(&self, status: RequestStatus) -> u64 {
        self.by_status
            .iter()
            .find(|group| group.key == status)
            .map(|group| group.count)
            .unwrap_or(0)
    }

    /// Share of approved requests in the filtered total, rounded to a whole percent
    pub fn approval_rate(&self) -> u32 {
        percentage(self.status_count(RequestStatus::Approved), self.total_requests).round() as u32
    }
}

/// `part / total * 100`, or 0 when there is nothing to divide by
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
