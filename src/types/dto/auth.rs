use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Sign-up form
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

/// Session token issued on login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token to send in the Authorization header
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Session expiration time (Unix timestamp, seconds)
    pub expires_at: i64,

    pub user_id: String,

    pub username: String,

    /// Landing page after login
    pub redirect_to: String,
}

/// Response model for whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// User ID (UUID)
    pub user_id: String,

    pub username: String,

    /// Session expiration time (Unix timestamp, seconds)
    pub expires_at: i64,
}

/// Profile password change form
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}
