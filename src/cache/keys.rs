//! Cache keys for every cached view
//!
//! Keys mirror the dashboard paths the views are rendered at, so a mutation
//! can invalidate exactly the pages that show the changed rows.

use crate::types::internal::ReportFilter;

pub const BENEFICIARY_LIST: &str = "/dashboard/registros";
pub const REQUEST_LIST: &str = "/dashboard/solicitudes";
pub const DASHBOARD: &str = "/dashboard";
/// Prefix shared by every filtered report page
pub const REPORTS_PREFIX: &str = "/dashboard/reportes";

pub fn beneficiary_detail(id: &str) -> String {
    format!("{}/{}", BENEFICIARY_LIST, id)
}

pub fn request_detail(id: &str) -> String {
    format!("{}/{}", REQUEST_LIST, id)
}

pub fn report(filter: &ReportFilter) -> String {
    format!("{}?{}", REPORTS_PREFIX, filter.cache_suffix())
}
