use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::SecretManager;
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::types::db::user;
use crate::types::internal::{Claims, Session};

/// Issues and validates HS256 session tokens
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    session_ttl_minutes: i64,
}

impl TokenProvider {
    pub fn new(secret_manager: Arc<SecretManager>, session_ttl_minutes: i64) -> Self {
        Self {
            secret_manager,
            session_ttl_minutes,
        }
    }

    /// Issue a session token for an authenticated user
    ///
    /// # Returns
    /// * `(String, Session)` - The encoded token and the session it represents
    pub fn issue_session_token(&self, user: &user::Model) -> Result<(String, Session), InternalError> {
        let now = Utc::now().timestamp();
        let exp = self
            .session_ttl_minutes
            .checked_mul(60)
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| InternalError::crypto("jwt_generation", "session lifetime out of range"))?;
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            exp,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        let token = self.encode_claims(&claims)?;
        tracing::debug!(user_id = %claims.sub, jti = %claims.jti, "Issued session token");

        Ok((token, Session::from(claims)))
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> Result<String, InternalError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", e.to_string()))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    /// * `CredentialError::ExpiredToken` when `exp` has passed
    /// * `CredentialError::InvalidToken` for bad signatures and malformed tokens
    pub fn validate_session_token(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => InternalError::from(CredentialError::ExpiredToken),
            ErrorKind::InvalidSignature => {
                tracing::warn!("Session token with invalid signature rejected");
                InternalError::from(CredentialError::invalid_token("invalid signature"))
            }
            _ => InternalError::from(CredentialError::invalid_token(e.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::test_secret_manager;

    fn provider() -> TokenProvider {
        TokenProvider::new(test_secret_manager(), 720)
    }

    fn user() -> user::Model {
        user::Model {
            id: "3f0c8f7e-5a3c-4a53-9d43-0a6f5b2d9c11".to_string(),
            username: "vocero".to_string(),
            password_hash: "$argon2id$unused".to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_issued_token_validates() {
        let provider = provider();
        let (token, session) = provider.issue_session_token(&user()).unwrap();

        let claims = provider.validate_session_token(&token).unwrap();
        assert_eq!(claims.sub, user().id);
        assert_eq!(claims.username, "vocero");
        assert_eq!(Session::from(claims), session);
    }

    #[test]
    fn test_session_expiry_follows_ttl() {
        let provider = TokenProvider::new(test_secret_manager(), 30);
        let before = Utc::now().timestamp();
        let (_, session) = provider.issue_session_token(&user()).unwrap();

        assert!(session.expires_at >= before + 30 * 60);
        assert!(session.expires_at <= Utc::now().timestamp() + 30 * 60);
    }

    #[test]
    fn test_oversized_ttl_is_an_error() {
        let provider = TokenProvider::new(test_secret_manager(), i64::MAX);

        let result = provider.issue_session_token(&user());
        assert!(matches!(result, Err(InternalError::Crypto { .. })));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let provider = provider();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            username: "vocero".to_string(),
            exp: now - 3600,
            iat: now - 7200,
            jti: "jti-1".to_string(),
        };
        let token = provider.encode_claims(&claims).unwrap();

        let result = provider.validate_session_token(&token);
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::ExpiredToken))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_invalid() {
        let other = TokenProvider::new(
            Arc::new(
                SecretManager::new(
                    "a-completely-different-secret-of-32-chars",
                    "test-pepper-16-chars",
                )
                .unwrap(),
            ),
            720,
        );
        let (token, _) = other.issue_session_token(&user()).unwrap();

        let result = provider().validate_session_token(&token);
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidToken { .. }))
        ));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let result = provider().validate_session_token("not.a.token");
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidToken { .. }))
        ));
    }
}
