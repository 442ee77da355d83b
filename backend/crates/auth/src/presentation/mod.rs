//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, policy and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{RequestGate, require_authorized};
pub use policy::AccessPolicy;
pub use router::{auth_router, auth_router_generic};
