//! Auth Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_codec::TokenCodec;
use crate::domain::repository::CredentialStore;
use crate::infra::postgres::PgCredentialStore;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    store: PgCredentialStore,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
) -> Router {
    auth_router_generic(store, codec, config)
}

/// Create a generic Auth router for any credential store implementation
///
/// Routes are relative; mount under `/api/auth`.
pub fn auth_router_generic<S>(store: S, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Router
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        store: Arc::new(store),
        codec,
        config,
    };

    Router::new()
        .route("/login", post(handlers::login::<S>))
        .with_state(state)
}
