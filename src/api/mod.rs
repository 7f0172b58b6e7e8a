// API layer - HTTP endpoints
pub mod auth;
pub mod beneficiaries;
pub mod health;
pub mod helpers;
pub mod reports;
pub mod requests;

use poem_openapi::{SecurityScheme, auth::Bearer};

pub use auth::AuthApi;
pub use beneficiaries::BeneficiariesApi;
pub use health::HealthApi;
pub use reports::ReportsApi;
pub use requests::RequestsApi;

/// Session token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);
