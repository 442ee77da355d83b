//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Product)
//! - Domain value objects (ProductDraft)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod value_objects;
