// Coordinators layer - Workflow orchestration
//
// Coordinators implement the server actions: validate form input, call
// stores and providers, invalidate cached pages and pick the redirect target.

pub mod auth_coordinator;
pub mod beneficiary_coordinator;
pub mod report_coordinator;
pub mod request_coordinator;

pub use auth_coordinator::AuthCoordinator;
pub use beneficiary_coordinator::BeneficiaryCoordinator;
pub use report_coordinator::ReportCoordinator;
pub use request_coordinator::RequestCoordinator;
