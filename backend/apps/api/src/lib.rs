//! Textile inventory API
//!
//! Wiring for the binary: configuration, router assembly and startup
//! seeding. Kept as a library so the end-to-end tests can build the same
//! router against in-memory stores.

pub mod app;
pub mod config;
pub mod seed;

pub use app::{AppContext, build_app};
pub use config::AppConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
