//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod seed_users;
pub mod token_codec;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use seed_users::{SeedOutcome, SeedUser, SeedUsersUseCase};
pub use token_codec::{AuthToken, IssuedToken, TokenCodec, TokenError};
