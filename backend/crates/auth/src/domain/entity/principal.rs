//! Principal
//!
//! The authenticated caller of the current request. Rebuilt from the bearer
//! token on every request and dropped with it.

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: UserRole,
}

impl Principal {
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// `true` if the caller's role is one of `roles`
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_any_role() {
        let user = Principal::new("user", UserRole::User);
        assert!(user.has_any_role(&[UserRole::User, UserRole::Admin]));
        assert!(!user.has_any_role(&[UserRole::Admin]));
        assert!(!user.has_any_role(&[]));
    }
}
