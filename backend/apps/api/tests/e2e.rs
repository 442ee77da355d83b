//! End-to-end flows through the fully assembled router

use auth::{AuthConfig, InMemoryCredentialStore};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use inventory::InMemoryProductRepository;
use platform::storage::ImageStorage;
use serde_json::{Value, json};
use tempfile::TempDir;
use textile_api::seed::seed_default_accounts;
use textile_api::{AppContext, build_app};
use tower::ServiceExt;

async fn app(uploads: &TempDir) -> Router {
    let credentials = InMemoryCredentialStore::new();
    seed_default_accounts(credentials.clone(), "admin123", "user123")
        .await
        .unwrap();

    let ctx = AppContext::new(
        AuthConfig::with_random_secret(),
        ImageStorage::new(uploads.path()),
        None,
    );
    build_app(ctx, credentials, InMemoryProductRepository::new())
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = call(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_admin_creates_user_cannot_update() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(&uploads).await;

    let admin = login(&app, "admin", "admin123").await;
    let (status, created) = call(
        &app,
        json_request(
            "POST",
            "/api/products",
            Some(&admin),
            json!({ "name": "Silk Scarf", "color": "blue", "size": "M" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let user = login(&app, "user", "user123").await;
    let (status, err) = call(
        &app,
        json_request(
            "PUT",
            &format!("/api/products/{id}"),
            Some(&user),
            json!({ "name": "Hijacked", "color": "red", "size": "S" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["status"], 403);
    assert_eq!(err["path"], format!("/api/products/{id}"));

    // unchanged
    let (status, fetched) = call(
        &app,
        Request::get(format!("/api/products/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {user}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Silk Scarf");
}

#[tokio::test]
async fn test_unknown_route_gets_uniform_404() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(&uploads).await;

    let (status, body) = call(
        &app,
        Request::get("/api/nothing-here").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], "/api/nothing-here");
}

#[tokio::test]
async fn test_products_require_a_token() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(&uploads).await;

    let (status, body) = call(
        &app,
        Request::get("/api/products").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        "Authentication is required to access this resource"
    );
    assert_eq!(body["path"], "/api/products");
}

#[tokio::test]
async fn test_seeding_is_skipped_when_users_exist() {
    let credentials = InMemoryCredentialStore::new();
    seed_default_accounts(credentials.clone(), "admin123", "user123")
        .await
        .unwrap();

    let outcome = seed_default_accounts(credentials, "other", "other")
        .await
        .unwrap();
    assert_eq!(outcome, auth::application::SeedOutcome::Skipped(2));
}

#[tokio::test]
async fn test_uploaded_images_are_served_statically() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(&uploads).await;
    std::fs::write(uploads.path().join("swatch.png"), b"png bytes").unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::get("/uploads/images/swatch.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"png bytes");
}
