//! Authorization Policy
//!
//! Explicit table from operation (HTTP method + route template) to the roles
//! allowed to call it. Operations missing from the table are denied.
//!
//! ```
//! use auth::presentation::policy::AccessPolicy;
//! use auth::domain::UserRole;
//! use axum::http::Method;
//!
//! let policy = AccessPolicy::new()
//!     .rule(Method::GET, "/api/products", &[UserRole::User, UserRole::Admin])
//!     .rule(Method::POST, "/api/products", &[UserRole::Admin]);
//!
//! assert!(policy.permits(&Method::GET, "/api/products", UserRole::User));
//! assert!(!policy.permits(&Method::POST, "/api/products", UserRole::User));
//! assert!(!policy.permits(&Method::PATCH, "/api/products", UserRole::Admin));
//! ```

use std::collections::HashMap;

use axum::http::Method;

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: HashMap<(Method, String), Vec<UserRole>>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `roles` to call `method` on `route`. A later rule for the same
    /// operation replaces the earlier one.
    pub fn rule(mut self, method: Method, route: &str, roles: &[UserRole]) -> Self {
        self.rules.insert((method, route.to_string()), roles.to_vec());
        self
    }

    /// Combine two tables
    pub fn merge(mut self, other: AccessPolicy) -> Self {
        self.rules.extend(other.rules);
        self
    }

    pub fn required_roles(&self, method: &Method, route: &str) -> Option<&[UserRole]> {
        self.rules
            .get(&(method.clone(), route.to_string()))
            .map(Vec::as_slice)
    }

    /// `false` when the operation has no rule
    pub fn permits(&self, method: &Method, route: &str, role: UserRole) -> bool {
        self.required_roles(method, route)
            .is_some_and(|roles| roles.contains(&role))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operation_denied() {
        let policy = AccessPolicy::new().rule(Method::GET, "/a", &[UserRole::User]);
        assert!(!policy.permits(&Method::GET, "/b", UserRole::User));
        assert!(!policy.permits(&Method::DELETE, "/a", UserRole::Admin));
    }

    #[test]
    fn test_empty_role_set_denies_everyone() {
        let policy = AccessPolicy::new().rule(Method::GET, "/a", &[]);
        for role in UserRole::ALL {
            assert!(!policy.permits(&Method::GET, "/a", role));
        }
    }

    #[test]
    fn test_merge_and_replace() {
        let policy = AccessPolicy::new()
            .rule(Method::GET, "/a", &[UserRole::User])
            .merge(AccessPolicy::new().rule(Method::GET, "/a", &[UserRole::Admin]));

        assert_eq!(policy.len(), 1);
        assert!(policy.permits(&Method::GET, "/a", UserRole::Admin));
        assert!(!policy.permits(&Method::GET, "/a", UserRole::User));
    }
}
