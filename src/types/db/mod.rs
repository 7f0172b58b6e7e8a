// Database entities - SeaORM models
pub mod beneficiary;
pub mod request;
pub mod user;
