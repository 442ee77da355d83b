//! Inventory Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Product entity, validated input, repository trait
//! - `application/` - Product service
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router and access policy
//!
//! Every route sits behind the auth request gate. Reads are open to
//! `USER` and `ADMIN`; writes and image management need `ADMIN`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::ProductService;
pub use domain::entities::Product;
pub use domain::value_objects::ProductDraft;
pub use error::{InventoryError, InventoryResult};
pub use infra::{InMemoryProductRepository, PgProductRepository};
pub use presentation::router::{inventory_router, inventory_router_generic, product_access_policy};
