// API-facing error types
pub mod auth;
pub mod management;

// Re-exports for convenience
pub use auth::AuthError;
pub use management::ManagementError;
