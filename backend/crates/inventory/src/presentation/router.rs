//! Inventory Router

use std::sync::Arc;

use auth::middleware::{RequestGate, require_authorized};
use auth::{AccessPolicy, UserRole};
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{delete, get, post},
};
use platform::storage::ImageStorage;

use crate::domain::repository::ProductRepository;
use crate::infra::postgres::PgProductRepository;
use crate::presentation::handlers::{self, InventoryAppState};

pub const PRODUCTS: &str = "/api/products";
pub const PRODUCT_BY_ID: &str = "/api/products/{id}";
pub const PRODUCT_SEARCH: &str = "/api/products/search";
pub const PRODUCTS_BY_COLOR: &str = "/api/products/color/{color}";
pub const PRODUCTS_BY_SIZE: &str = "/api/products/size/{size}";
pub const PRODUCT_IMAGES: &str = "/api/products/images";
pub const PRODUCT_IMAGE: &str = "/api/products/images/{filename}";

/// Multipart framing allowance on top of the image limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Role requirements for every inventory route
///
/// Reads are open to any signed-in role; writes and image management
/// are admin-only.
pub fn product_access_policy() -> AccessPolicy {
    const READERS: &[UserRole] = &[UserRole::User, UserRole::Admin];
    const ADMINS: &[UserRole] = &[UserRole::Admin];

    AccessPolicy::new()
        .rule(Method::GET, PRODUCTS, READERS)
        .rule(Method::GET, PRODUCT_BY_ID, READERS)
        .rule(Method::GET, PRODUCT_SEARCH, READERS)
        .rule(Method::GET, PRODUCTS_BY_COLOR, READERS)
        .rule(Method::GET, PRODUCTS_BY_SIZE, READERS)
        .rule(Method::POST, PRODUCTS, ADMINS)
        .rule(Method::PUT, PRODUCT_BY_ID, ADMINS)
        .rule(Method::DELETE, PRODUCT_BY_ID, ADMINS)
        .rule(Method::POST, PRODUCT_IMAGES, ADMINS)
        .rule(Method::DELETE, PRODUCT_IMAGE, ADMINS)
}

/// Create the inventory router with PostgreSQL repository
pub fn inventory_router(
    repo: PgProductRepository,
    images: ImageStorage,
    gate: RequestGate,
) -> Router {
    inventory_router_generic(repo, images, gate)
}

/// Create a generic inventory router for any repository implementation
///
/// Routes carry their full `/api/products` paths; merge, do not nest.
/// `gate` must carry a policy covering every route here (see
/// [`product_access_policy`]), otherwise the route is denied.
pub fn inventory_router_generic<R>(repo: R, images: ImageStorage, gate: RequestGate) -> Router
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let upload_limit = images.max_bytes() + MULTIPART_OVERHEAD;
    let state = InventoryAppState {
        repo: Arc::new(repo),
        images: Arc::new(images),
    };

    Router::new()
        .route(
            PRODUCTS,
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route(PRODUCT_SEARCH, get(handlers::search_products::<R>))
        .route(PRODUCTS_BY_COLOR, get(handlers::products_by_color::<R>))
        .route(PRODUCTS_BY_SIZE, get(handlers::products_by_size::<R>))
        .route(
            PRODUCT_IMAGES,
            post(handlers::upload_image::<R>).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(PRODUCT_IMAGE, delete(handlers::delete_image::<R>))
        .route(
            PRODUCT_BY_ID,
            get(handlers::get_product::<R>)
                .put(handlers::update_product::<R>)
                .delete(handlers::delete_product::<R>),
        )
        .route_layer(from_fn_with_state(gate, require_authorized))
        .with_state(state)
}
