//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message shared by every token failure, so callers cannot tell them apart
pub const AUTHENTICATION_REQUIRED: &str = "Authentication is required to access this resource";

/// Message for every failed login
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user, disabled user, or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No `Authorization: Bearer` header
    #[error("Missing bearer token")]
    MissingToken,

    /// Bad signature or malformed token
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Authenticated, but the role is not allowed for this operation
    #[error("Access denied")]
    AccessDenied,

    /// Malformed login request
    #[error("{0}")]
    Validation(String),

    #[error("User name already exists")]
    UsernameTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::AccessDenied => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Message safe to show the caller
    fn public_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                AUTHENTICATION_REQUIRED.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.public_message())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccessDenied => {
                tracing::warn!("Access denied for authenticated caller");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::TokenExpired.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::AccessDenied.kind(), ErrorKind::Forbidden);
        assert_eq!(
            AuthError::Validation("username: Username is required".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            AuthError::Internal("x".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let messages: Vec<String> = [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::TokenExpired,
        ]
        .iter()
        .map(|e| e.to_app_error().message().to_string())
        .collect();

        assert!(messages.iter().all(|m| m == AUTHENTICATION_REQUIRED));
    }

    #[test]
    fn test_invalid_credentials_message() {
        let app_err = AuthError::InvalidCredentials.to_app_error();
        assert_eq!(app_err.status_code(), 401);
        assert_eq!(app_err.message(), INVALID_CREDENTIALS);
    }
}
