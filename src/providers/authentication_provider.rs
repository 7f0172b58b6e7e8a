use std::sync::Arc;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::CryptoProvider;
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::context::RequestContext;

/// Checks username/password pairs against stored users
pub struct AuthenticationProvider {
    user_store: Arc<UserStore>,
    crypto_provider: Arc<CryptoProvider>,
}

impl AuthenticationProvider {
    pub fn new(user_store: Arc<UserStore>, crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            user_store,
            crypto_provider,
        }
    }

    /// Verify a username/password pair
    ///
    /// Unknown usernames and wrong passwords both yield
    /// `CredentialError::InvalidCredentials`, after the same hashing work.
    pub async fn verify_credentials(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let Some(user) = self.user_store.find_by_username(username).await? else {
            self.crypto_provider.verify_dummy_password(password)?;
            tracing::info!(request_id = %ctx.request_id, "Login failed: unknown username");
            return Err(CredentialError::InvalidCredentials.into());
        };

        if !self.crypto_provider.verify_password(password, &user.password_hash)? {
            tracing::info!(request_id = %ctx.request_id, user_id = %user.id, "Login failed: wrong password");
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Verify the current password of a signed-in user
    ///
    /// # Errors
    /// `CredentialError::IncorrectPassword` when the password does not match.
    pub async fn verify_current_password(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let user = self.user_store.get_user_by_id(user_id).await?;

        if !self.crypto_provider.verify_password(password, &user.password_hash)? {
            return Err(CredentialError::IncorrectPassword.into());
        }

        Ok(user)
    }
}
