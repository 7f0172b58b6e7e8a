// Data transfer objects - request and response bodies of the HTTP API

pub mod auth;
pub mod beneficiary;
pub mod common;
pub mod report;
pub mod request;
