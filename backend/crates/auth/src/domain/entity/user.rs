//! User Entity
//!
//! A stored credential: who may log in, with what password, and as which role.

use platform::password::HashedPassword;

use crate::domain::value_object::{user_name::UserName, user_role::UserRole};

/// User record owned by the credential store
///
/// Created at provisioning time and read-only during a request.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique login name
    pub username: UserName,
    /// Argon2id PHC hash
    pub password_hash: HashedPassword,
    pub role: UserRole,
    /// Disabled accounts cannot log in
    pub enabled: bool,
}

impl UserRecord {
    /// Create an enabled user
    pub fn new(username: UserName, password_hash: HashedPassword, role: UserRole) -> Self {
        Self {
            username,
            password_hash,
            role,
            enabled: true,
        }
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.enabled
    }
}
