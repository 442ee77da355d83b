//! In-memory credential store
//!
//! Used by tests and local runs without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> AuthResult<MutexGuard<'_, HashMap<String, UserRecord>>> {
        self.users
            .lock()
            .map_err(|_| AuthError::Internal("credential store lock poisoned".to_string()))
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<UserRecord>> {
        Ok(self.users()?.get(username.as_str()).cloned())
    }

    async fn count(&self) -> AuthResult<u64> {
        Ok(self.users()?.len() as u64)
    }

    async fn create(&self, user: &UserRecord) -> AuthResult<()> {
        let mut users = self.users()?;
        if users.contains_key(user.username.as_str()) {
            return Err(AuthError::UsernameTaken);
        }
        users.insert(user.username.as_str().to_string(), user.clone());
        Ok(())
    }
}
