use serde::{Deserialize, Serialize};

/// JWT Claims structure for session tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Username at the time the session was issued
    pub username: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Unique token id
    pub jti: String,
}

/// Authenticated identity carried through a request
///
/// Built only from a validated session token, so holding one means the
/// caller passed the session check at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub expires_at: i64,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            expires_at: claims.exp,
        }
    }
}
