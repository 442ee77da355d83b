//! Application Error
//!
//! [`AppError`] is what every crate-level error finally becomes at the HTTP
//! boundary; [`ErrorBody`] is how it is rendered.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::kind::ErrorKind;

/// 5xx 応答の `message` に入れる固定文言
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// 境界で使う共通エラー
///
/// `AuthError` や `InventoryError` は応答に変換される直前に一度だけこの型になる。
/// `message` は 4xx ではそのまま返し、5xx ではログにのみ残す。
/// `source` は常にログ専用。
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "Product not found with id: 7");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.to_body("/api/products/7").error, "Not Found");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// 入力不正 (400)
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 対象なし (404)
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// 一意制約違反など (409)
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// DB 停止・枯渇 (503)
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// ログ用に原因を添付する
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// 内部向けの文言（5xx では内部情報を含み得る）
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 呼び出し側に見せてよい文言
    pub fn client_message(&self) -> &str {
        match self.kind.is_server_error() {
            true => INTERNAL_ERROR_MESSAGE,
            false => &self.message,
        }
    }

    /// `path` を埋めた応答ボディ
    pub fn to_body(&self, path: impl Into<String>) -> ErrorBody {
        ErrorBody {
            status: self.status_code(),
            error: self.kind.as_str().to_owned(),
            message: self.client_message().to_owned(),
            path: path.into(),
        }
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("source", &self.source.as_ref().map(|s| s.to_string()))
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.status_code(), self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|s| s as &(dyn Error + 'static))
    }
}

/// 全エラー応答で共通の JSON ボディ
///
/// `{ "status": 404, "error": "Not Found", "message": "...", "path": "/api/products/9" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    /// `ErrorKind::as_str`
    pub error: String,
    pub message: String,
    /// リクエストパス（ミドルウェアで設定）
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_map_to_status() {
        let cases = [
            (AppError::bad_request("x"), 400),
            (AppError::not_found("x"), 404),
            (AppError::conflict("x"), 409),
            (AppError::internal("x"), 500),
            (AppError::service_unavailable("x"), 503),
            (AppError::new(ErrorKind::Forbidden, "x"), 403),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn test_source_is_kept_for_logging() {
        let io_err = std::io::Error::other("disk on fire");
        let err = AppError::internal("Failed to store file").with_source(io_err);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("disk on fire"));
        assert!(format!("{err:?}").contains("disk on fire"));
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("Product not found with id: 3");
        assert_eq!(err.to_string(), "Not Found (404): Product not found with id: 3");
    }

    #[test]
    fn test_client_message_hides_internal_details() {
        let err = AppError::internal("connection refused: 10.0.0.3:5432");
        assert_eq!(err.message(), "connection refused: 10.0.0.3:5432");
        assert_eq!(err.client_message(), INTERNAL_ERROR_MESSAGE);

        let err = AppError::bad_request("name: Name is required");
        assert_eq!(err.client_message(), "name: Name is required");
    }

    #[test]
    fn test_to_body() {
        let body = AppError::new(ErrorKind::Forbidden, "Access denied").to_body("/api/products");
        assert_eq!(
            body,
            ErrorBody {
                status: 403,
                error: "Forbidden".to_string(),
                message: "Access denied".to_string(),
                path: "/api/products".to_string(),
            }
        );

        let body = AppError::service_unavailable("pool exhausted").to_body("/api/products/1");
        assert_eq!(body.status, 503);
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
    }
}
