use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::providers::{AuthenticationProvider, CryptoProvider, TokenProvider};
use crate::stores::UserStore;
use crate::types::db::user;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{PasswordChangeForm, Session, SignupForm};

/// Orchestrates sign-up, login and profile workflows
pub struct AuthCoordinator {
    user_store: Arc<UserStore>,
    token_provider: Arc<TokenProvider>,
    crypto_provider: Arc<CryptoProvider>,
    authentication_provider: AuthenticationProvider,
}

impl AuthCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let authentication_provider = AuthenticationProvider::new(
            app_data.user_store.clone(),
            app_data.crypto_provider.clone(),
        );

        Self {
            user_store: app_data.user_store.clone(),
            token_provider: app_data.token_provider.clone(),
            crypto_provider: app_data.crypto_provider.clone(),
            authentication_provider,
        }
    }

    /// Get a reference to the internal TokenProvider
    ///
    /// The API layer uses it to validate bearer tokens.
    pub fn token_provider(&self) -> Arc<TokenProvider> {
        self.token_provider.clone()
    }

    /// Register a new administrator
    ///
    /// 1. Hash the password
    /// 2. Insert the user (rejecting taken usernames)
    pub async fn signup(&self, ctx: &RequestContext, form: SignupForm) -> Result<user::Model, InternalError> {
        let password_hash = self.crypto_provider.hash_password(&form.password)?;
        let user = self.user_store.create_user(&form.username, password_hash).await?;

        tracing::info!(request_id = %ctx.request_id, user_id = %user.id, "Sign-up completed");
        Ok(user)
    }

    /// Verify credentials and issue a session token
    ///
    /// # Returns
    /// * `(String, Session)` - Encoded token and the session it carries
    pub async fn login(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: &str,
    ) -> Result<(String, Session), InternalError> {
        // Sign-up stores usernames trimmed
        let username = username.trim();
        let user = self
            .authentication_provider
            .verify_credentials(ctx, username, password)
            .await?;

        let (token, session) = self.token_provider.issue_session_token(&user)?;

        tracing::info!(request_id = %ctx.request_id, user_id = %user.id, "Login succeeded");
        Ok((token, session))
    }

    /// The caller's session
    pub fn whoami(&self, ctx: &RequestContext) -> Result<Session, InternalError> {
        ctx.require_session().cloned()
    }

    /// Change the signed-in user's password
    ///
    /// The user is taken from the session, never from the form.
    pub async fn change_password(&self, ctx: &RequestContext, form: PasswordChangeForm) -> Result<(), InternalError> {
        let session = ctx.require_session()?;

        let user = self
            .authentication_provider
            .verify_current_password(&session.user_id, &form.current_password)
            .await?;

        let password_hash = self.crypto_provider.hash_password(&form.new_password)?;
        self.user_store.update_password_hash(&user.id, password_hash).await?;

        tracing::info!(request_id = %ctx.request_id, user_id = %user.id, "Password change completed");
        Ok(())
    }

    /// Create an administrator from the CLI
    ///
    /// # Returns
    /// * `(user::Model, String)` - The user and the password it was created with
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        username: &str,
        password: Option<String>,
    ) -> Result<(user::Model, String), InternalError> {
        let password = password.unwrap_or_else(|| self.crypto_provider.generate_secure_password());
        let form = SignupForm::parse(username, &password, &password)?;
        let user = self.signup(ctx, form).await?;
        Ok((user, password))
    }
}
