use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::AppData;
use crate::api::{BearerAuth, helpers};
use crate::coordinators::AuthCoordinator;
use crate::errors::AuthError;
use crate::types::dto::auth::{
    ChangePasswordRequest, LoginRequest, SessionResponse, SignupRequest, WhoAmIResponse,
};
use crate::types::dto::common::MutationResponse;
use crate::types::internal::context::RequestContext;
use crate::types::internal::{PasswordChangeForm, SignupForm};

/// Authentication API endpoints
pub struct AuthApi {
    auth_coordinator: Arc<AuthCoordinator>,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            auth_coordinator: Arc::new(AuthCoordinator::new(app_data)),
        }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new administrator account
    #[oai(path = "/signup", method = "post", tag = "AuthTags::Authentication")]
    async fn signup(&self, req: &Request, body: Json<SignupRequest>) -> Result<Json<MutationResponse>, AuthError> {
        let ctx = RequestContext::from_request(req);
        let form = SignupForm::parse(&body.username, &body.password, &body.confirm_password)?;

        let user = self.auth_coordinator.signup(&ctx, form).await?;

        Ok(Json(MutationResponse::new(
            "¡Usuario registrado exitosamente! Ahora puedes iniciar sesión.",
            "/login",
            Some(user.id),
        )))
    }

    /// Login with username and password to receive a session token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, req: &Request, body: Json<LoginRequest>) -> Result<Json<SessionResponse>, AuthError> {
        let ctx = RequestContext::from_request(req);

        let (access_token, session) = self
            .auth_coordinator
            .login(&ctx, &body.username, &body.password)
            .await?;

        Ok(Json(SessionResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_at: session.expires_at,
            user_id: session.user_id,
            username: session.username,
            redirect_to: "/dashboard".to_string(),
        }))
    }

    /// Verify the session token and return the signed-in user
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, req: &Request, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let ctx = helpers::auth_context(req, &auth, &self.auth_coordinator.token_provider())?;
        let session = self.auth_coordinator.whoami(&ctx)?;

        Ok(Json(WhoAmIResponse {
            user_id: session.user_id,
            username: session.username,
            expires_at: session.expires_at,
        }))
    }

    /// Change the signed-in user's password
    #[oai(path = "/change-password", method = "post", tag = "AuthTags::Authentication")]
    async fn change_password(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<MutationResponse>, AuthError> {
        let ctx = helpers::auth_context(req, &auth, &self.auth_coordinator.token_provider())?;
        let form = PasswordChangeForm::parse(&body.current_password, &body.new_password, &body.confirm_password)?;

        self.auth_coordinator.change_password(&ctx, form).await?;

        Ok(Json(MutationResponse::new(
            "Contraseña actualizada exitosamente",
            "/dashboard/perfil",
            None,
        )))
    }
}
