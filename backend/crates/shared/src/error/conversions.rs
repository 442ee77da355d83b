//! Error conversions
//!
//! `From` impls that classify infrastructure errors into [`AppError`], and
//! (with the `axum` feature) the HTTP rendering of the uniform error body.

#[cfg(feature = "sqlx")]
use super::app_error::AppError;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
mod http_support {
    use axum::Json;
    use axum::body::Body;
    use axum::extract::Request;
    use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
    use axum::http::{StatusCode, Uri, header};
    use axum::middleware::Next;
    use axum::response::{IntoResponse, Response};

    use super::super::app_error::{AppError, ErrorBody};

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            if self.kind().is_server_error() {
                match std::error::Error::source(&self) {
                    Some(source) => {
                        tracing::error!(error = %self, source = %source, "Request failed")
                    }
                    None => tracing::error!(error = %self, "Request failed"),
                }
            }

            let status = StatusCode::from_u16(self.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            // path はリクエストを知る `attach_request_path` が埋める
            let body = self.to_body(String::new());
            let mut response = (status, Json(body.clone())).into_response();
            response.extensions_mut().insert(body);
            response
        }
    }

    impl From<JsonRejection> for AppError {
        fn from(rejection: JsonRejection) -> Self {
            AppError::bad_request(rejection.body_text())
        }
    }

    impl From<PathRejection> for AppError {
        fn from(rejection: PathRejection) -> Self {
            AppError::bad_request(rejection.body_text())
        }
    }

    impl From<QueryRejection> for AppError {
        fn from(rejection: QueryRejection) -> Self {
            AppError::bad_request(rejection.body_text())
        }
    }

    /// Middleware that stamps the request path into uniform error bodies.
    ///
    /// Responses produced from an [`AppError`] carry their [`ErrorBody`] as a
    /// response extension; this layer fills in `path` and re-renders the body.
    /// Any other response passes through untouched.
    pub async fn attach_request_path(req: Request, next: Next) -> Response {
        let path = req.uri().path().to_owned();
        let mut response = next.run(req).await;

        let Some(mut body) = response.extensions_mut().remove::<ErrorBody>() else {
            return response;
        };
        body.path = path;

        match serde_json::to_vec(&body) {
            Ok(bytes) => {
                response.headers_mut().remove(header::CONTENT_LENGTH);
                *response.body_mut() = Body::from(bytes);
                response
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error body");
                response
            }
        }
    }

    /// Fallback for unmatched routes, rendered as the uniform 404 body.
    pub async fn route_not_found(uri: Uri) -> AppError {
        AppError::not_found(format!("No route for {}", uri.path()))
    }
}

#[cfg(feature = "axum")]
pub use http_support::{attach_request_path, route_not_found};

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_sqlx_availability_errors_are_503() {
        let pool: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(pool.kind(), ErrorKind::ServiceUnavailable);

        let io: AppError = sqlx::Error::Io(std::io::Error::other("connection reset")).into();
        assert_eq!(io.kind(), ErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_sqlx_other_errors() {
        let missing: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let decode: AppError = sqlx::Error::ColumnNotFound("color".into()).into();
        assert_eq!(decode.kind(), ErrorKind::InternalServerError);
        assert_eq!(decode.client_message(), crate::error::app_error::INTERNAL_ERROR_MESSAGE);
    }
}

#[cfg(all(test, feature = "axum"))]
mod http_tests {
    use super::*;
    use crate::error::app_error::{ErrorBody, INTERNAL_ERROR_MESSAGE};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::middleware;
    use axum::routing::get;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/missing",
                get(|| async { AppError::not_found("Product not found with id: 9") }),
            )
            .route(
                "/boom",
                get(|| async { AppError::internal("password authentication failed for user") }),
            )
            .route("/ok", get(|| async { "fine" }))
            .fallback(route_not_found)
            .layer(middleware::from_fn(attach_request_path))
    }

    async fn send(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_error_body_carries_request_path() {
        let (status, bytes) = send("/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "Product not found with id: 9");
        assert_eq!(body.path, "/missing");
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_message() {
        let (status, bytes) = send("/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, INTERNAL_ERROR_MESSAGE);
        assert_eq!(body.path, "/boom");
    }

    #[tokio::test]
    async fn test_unknown_route_uses_uniform_body() {
        let (status, bytes) = send("/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.path, "/nowhere");
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (status, bytes) = send("/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"fine");
    }
}
