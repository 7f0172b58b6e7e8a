pub mod auth;
pub mod context;
pub mod forms;
pub mod priority;
pub mod report;
pub mod request_status;
pub mod timestamp;

pub use auth::{Claims, Session};
pub use forms::{BeneficiaryForm, PasswordChangeForm, RequestEditForm, RequestForm, SignupForm};
pub use priority::Priority;
pub use report::ReportFilter;
pub use request_status::{RequestAction, RequestStatus};
