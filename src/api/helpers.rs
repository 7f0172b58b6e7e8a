use poem::Request;

use crate::api::BearerAuth;
use crate::errors::{AuthError, ManagementError};
use crate::providers::TokenProvider;
use crate::types::internal::context::RequestContext;

/// Context for a protected auth endpoint
pub fn auth_context(
    req: &Request,
    auth: &BearerAuth,
    token_provider: &TokenProvider,
) -> Result<RequestContext, AuthError> {
    RequestContext::authenticated(req, &auth.0.token, token_provider).map_err(AuthError::from_internal_error)
}

/// Context for a protected management endpoint
pub fn management_context(
    req: &Request,
    auth: &BearerAuth,
    token_provider: &TokenProvider,
) -> Result<RequestContext, ManagementError> {
    RequestContext::authenticated(req, &auth.0.token, token_provider)
        .map_err(ManagementError::from_internal_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::test_secret_manager;
    use crate::types::db::user;
    use poem_openapi::auth::Bearer;

    fn bearer(token: &str) -> BearerAuth {
        BearerAuth(Bearer {
            token: token.to_string(),
        })
    }

    #[test]
    fn test_valid_token_yields_authenticated_context() {
        let provider = TokenProvider::new(test_secret_manager(), 60);
        let user = user::Model {
            id: "user-1".to_string(),
            username: "vocero".to_string(),
            password_hash: String::new(),
            created_at: 0,
            updated_at: 0,
        };
        let (token, session) = provider.issue_session_token(&user).unwrap();
        let req = Request::builder().finish();

        let ctx = management_context(&req, &bearer(&token), &provider).unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.session, Some(session));
        assert_eq!(ctx.actor_id, "user-1");
    }

    #[test]
    fn test_bad_token_is_unauthorized() {
        let provider = TokenProvider::new(test_secret_manager(), 60);
        let req = Request::builder().finish();

        let err = management_context(&req, &bearer("garbage"), &provider).unwrap_err();
        assert!(matches!(err, ManagementError::Unauthorized(_)));

        let err = auth_context(&req, &bearer("garbage"), &provider).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}
