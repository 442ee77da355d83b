//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum_extra::extract::WithRejection;
use chrono::Utc;
use kernel::error::app_error::AppError;

use crate::application::config::AuthConfig;
use crate::application::token_codec::TokenCodec;
use crate::application::{LoginInput, LoginUseCase};
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, LoginResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<S>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub codec: Arc<TokenCodec>,
    pub config: Arc<AuthConfig>,
}

/// POST /api/auth/login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AuthResult<Json<LoginResponse>>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    req.validate().map_err(AuthError::Validation)?;

    tracing::info!(username = %req.username, "Login attempt");

    let use_case = LoginUseCase::new(
        state.store.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(
            LoginInput {
                username: req.username,
                password: req.password,
            },
            Utc::now(),
        )
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        token_type: "Bearer".to_string(),
        username: output.username,
        role: output.role,
    }))
}
