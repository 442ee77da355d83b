//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router with its access policy.

pub mod dto;
pub mod handlers;
pub mod router;
