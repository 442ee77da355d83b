//! Router assembly

use std::sync::Arc;

use auth::domain::CredentialStore;
use auth::middleware::RequestGate;
use auth::{AuthConfig, TokenCodec, auth_router_generic};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn;
use inventory::domain::repository::ProductRepository;
use inventory::presentation::dto::IMAGE_URL_PREFIX;
use inventory::{inventory_router_generic, product_access_policy};
use kernel::error::conversions::{attach_request_path, route_not_found};
use platform::storage::ImageStorage;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Everything the router needs besides the stores
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<AuthConfig>,
    pub codec: Arc<TokenCodec>,
    pub images: ImageStorage,
    /// `None` allows any origin
    pub frontend_origins: Option<Vec<String>>,
}

impl AppContext {
    pub fn new(
        auth: AuthConfig,
        images: ImageStorage,
        frontend_origins: Option<Vec<String>>,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(&auth));
        Self {
            auth: Arc::new(auth),
            codec,
            images,
            frontend_origins,
        }
    }
}

/// Build the full HTTP application
///
/// Every error response, including unknown routes, gets the uniform body
/// with the request path filled in.
pub fn build_app<S, R>(ctx: AppContext, credentials: S, products: R) -> Router
where
    S: CredentialStore + Clone + Send + Sync + 'static,
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let gate = RequestGate::new(ctx.codec.clone(), product_access_policy());
    let static_images = ServeDir::new(ctx.images.root());

    Router::new()
        .nest(
            "/api/auth",
            auth_router_generic(credentials, ctx.codec.clone(), ctx.auth.clone()),
        )
        .merge(inventory_router_generic(products, ctx.images.clone(), gate))
        .nest_service(IMAGE_URL_PREFIX, static_images)
        .fallback(route_not_found)
        .layer(from_fn(attach_request_path))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(ctx.frontend_origins.as_deref()))
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let allow_origin = match origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            if origins.is_empty() {
                tracing::warn!("FRONTEND_ORIGINS has no valid origins, allowing any");
                AllowOrigin::any()
            } else {
                AllowOrigin::list(origins)
            }
        }
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
