//! Inventory Error Types
//!
//! This module provides inventory-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::ProductId;
use platform::storage::StorageError;
use thiserror::Error;

/// Inventory-specific result type alias
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-specific error variants
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product not found with id: {0}")]
    NotFound(ProductId),

    /// Field validation failure, already formatted as `field: message, ...`
    #[error("{0}")]
    Validation(String),

    /// Image upload or removal failure
    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    /// Get the ErrorKind for this error
    ///
    /// Database failures are classified by the kernel conversion when the
    /// error is rendered, so this reports the fallback kind only.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::NotFound(_) => ErrorKind::NotFound,
            InventoryError::Validation(_) => ErrorKind::BadRequest,
            InventoryError::Storage(e) if e.is_client_error() => ErrorKind::BadRequest,
            InventoryError::Storage(_)
            | InventoryError::Database(_)
            | InventoryError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            InventoryError::Database(e) => {
                tracing::error!(error = %e, "Inventory database error");
            }
            InventoryError::Internal(msg) => {
                tracing::error!(message = %msg, "Inventory internal error");
            }
            InventoryError::Storage(e) if !e.is_client_error() => {
                tracing::error!(error = %e, "Image storage failure");
            }
            _ => {
                tracing::debug!(error = %self, "Inventory error");
            }
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Database(e) => AppError::from(e),
            InventoryError::Storage(e) if !e.is_client_error() => {
                AppError::new(ErrorKind::InternalServerError, "Failed to store image")
                    .with_source(e)
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<AppError> for InventoryError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => InventoryError::Validation(err.message().to_string()),
            _ => InventoryError::Internal(err.to_string()),
        }
    }
}

impl From<MultipartRejection> for InventoryError {
    fn from(rejection: MultipartRejection) -> Self {
        InventoryError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for InventoryError {
    fn from(err: MultipartError) -> Self {
        InventoryError::Validation(err.body_text())
    }
}
