//! Auth (Authentication / Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases, token codec, config
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, request gate, policy
//!
//! ## Features
//! - Username + password login issuing HS256 bearer tokens
//! - Role-based request gating (`USER`, `ADMIN`) from an explicit policy table
//! - Initial account seeding
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Tokens are stateless; the role is fixed at issuance until expiry
//! - Every login failure and every token failure looks the same to the caller
//! - Operations without a policy entry are denied

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token_codec::TokenCodec;
pub use domain::{Principal, UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryCredentialStore, PgCredentialStore};
pub use presentation::policy::AccessPolicy;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
