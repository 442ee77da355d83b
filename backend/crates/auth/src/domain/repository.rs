//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::UserRecord;
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Find user by user name (exact match)
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<UserRecord>>;

    /// Number of stored users
    async fn count(&self) -> AuthResult<u64>;

    /// Insert a new user. Fails with `UsernameTaken` on duplicates.
    async fn create(&self, user: &UserRecord) -> AuthResult<()>;
}
