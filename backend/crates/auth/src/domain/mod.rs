//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{principal::Principal, user::UserRecord};
pub use repository::CredentialStore;
pub use value_object::{user_name::UserName, user_role::UserRole};
