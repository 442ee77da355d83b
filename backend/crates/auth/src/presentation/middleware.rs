//! Request Gate
//!
//! Middleware that authenticates bearer tokens and applies the
//! [`AccessPolicy`] before a protected handler runs. Must be installed with
//! `Router::route_layer` so the matched route template is known.

use std::sync::Arc;

use axum::extract::{FromRequestParts, MatchedPath, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::application::token_codec::{TokenCodec, TokenError};
use crate::domain::entity::principal::Principal;
use crate::error::AuthError;
use crate::presentation::policy::AccessPolicy;

/// Middleware state
#[derive(Clone)]
pub struct RequestGate {
    pub codec: Arc<TokenCodec>,
    pub policy: Arc<AccessPolicy>,
}

impl RequestGate {
    pub fn new(codec: Arc<TokenCodec>, policy: AccessPolicy) -> Self {
        Self {
            codec,
            policy: Arc::new(policy),
        }
    }

    /// Resolve the caller and check the operation against the policy
    pub fn authorize(
        &self,
        headers: &HeaderMap,
        method: &axum::http::Method,
        route: &str,
    ) -> Result<Principal, AuthError> {
        let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;

        let token = self.codec.decode(token, Utc::now()).map_err(|e| match e {
            TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;
        let principal = Principal::new(token.subject, token.role);

        if !self.policy.permits(method, route, principal.role) {
            tracing::debug!(
                username = %principal.username,
                role = %principal.role,
                method = %method,
                route,
                "Role not permitted"
            );
            return Err(AuthError::AccessDenied);
        }

        Ok(principal)
    }
}

/// Middleware that requires a valid token whose role the policy allows
pub async fn require_authorized(
    State(gate): State<RequestGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let principal = gate.authorize(req.headers(), req.method(), &route)?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// `Authorization: Bearer <token>`; the scheme is case-insensitive
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Extracts the [`Principal`] placed by [`require_authorized`]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
