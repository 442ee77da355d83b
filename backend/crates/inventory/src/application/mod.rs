//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.

pub mod product_service;

pub use product_service::ProductService;
