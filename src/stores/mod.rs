// Stores layer - sea-orm data access, one store per table plus report aggregations

pub mod beneficiary_store;
pub mod report_store;
pub mod request_store;
pub mod user_store;

pub use beneficiary_store::BeneficiaryStore;
pub use report_store::ReportStore;
pub use request_store::RequestStore;
pub use user_store::UserStore;
