//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

/// Login request
///
/// Missing fields deserialize as empty and are reported by validation.
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Field errors as `field: message`, joined by `", "`
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push("username: Username is required");
        }
        if self.password.trim().is_empty() {
            errors.push("password: Password is required");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Always `"Bearer"`
    #[serde(rename = "type")]
    pub token_type: String,
    pub username: String,
    pub role: UserRole,
}
