use std::net::IpAddr;

use poem::Request;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::TokenProvider;
use crate::types::internal::Session;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries what logging and the coordinators need to know about the caller.
/// Replaces ambient session state: the session, when present, was validated
/// at the API boundary and travels explicitly with the request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Validated session, if the caller presented one
    pub session: Option<Session>,

    /// Source of the request (API or CLI)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            session: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create an unauthenticated context for an API request
    pub fn from_request(req: &Request) -> Self {
        Self {
            ip_address: Self::extract_ip_address(req),
            request_id: RequestId::new(),
            session: None,
            source: RequestSource::API,
            actor_id: "anonymous".to_owned(),
        }
    }

    /// Create a context for a protected API request
    ///
    /// Validates the bearer session token and attaches the resulting session.
    ///
    /// # Errors
    ///
    /// Returns a `CredentialError` when the token is malformed, tampered with
    /// or expired.
    pub fn authenticated(
        req: &Request,
        token: &str,
        token_provider: &TokenProvider,
    ) -> Result<Self, InternalError> {
        let claims = token_provider.validate_session_token(token)?;
        let ctx = Self::from_request(req).with_session(Session::from(claims));
        tracing::trace!("Request context created: {:?}", ctx);
        Ok(ctx)
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Attach a validated session and use its user as the actor
    pub fn with_session(mut self, session: Session) -> Self {
        self.actor_id = session.user_id.clone();
        self.session = Some(session);
        self
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Session of the caller, required by management operations
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::MissingSession` for anonymous contexts.
    pub fn require_session(&self) -> Result<&Session, InternalError> {
        self.session
            .as_ref()
            .ok_or_else(|| InternalError::Credential(CredentialError::MissingSession))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_context_has_no_session() {
        let ctx = RequestContext::for_cli("create-user");
        assert_eq!(ctx.source, RequestSource::CLI);
        assert_eq!(ctx.actor_id, "cli:create-user");
        assert!(!ctx.is_authenticated());
        assert!(ctx.require_session().is_err());
    }

    #[test]
    fn test_with_session_sets_actor() {
        let session = Session {
            user_id: "user-1".to_owned(),
            username: "vocero".to_owned(),
            expires_at: 0,
        };
        let ctx = RequestContext::for_cli("test").with_session(session.clone());

        assert_eq!(ctx.actor_id, "user-1");
        assert_eq!(ctx.require_session().unwrap(), &session);
    }

    #[test]
    fn test_ip_address_from_forwarded_header() {
        let req = Request::builder()
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .finish();
        let ctx = RequestContext::from_request(&req);

        assert_eq!(ctx.ip_address, Some("203.0.113.7".parse().unwrap()));
        assert_eq!(ctx.source, RequestSource::API);
    }
}
