//! Seed Users Use Case
//!
//! Provisions the initial accounts when the credential store is empty.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Account to provision
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Store was empty; these usernames were created
    Created(Vec<String>),
    /// Store already had this many users; nothing was written
    Skipped(u64),
}

pub struct SeedUsersUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> SeedUsersUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, seeds: Vec<SeedUser>) -> AuthResult<SeedOutcome> {
        let existing = self.store.count().await?;
        if existing > 0 {
            tracing::info!(existing, "Users already exist, skipping seed");
            return Ok(SeedOutcome::Skipped(existing));
        }

        // Nothing is written unless every seed is usable
        let records = seeds
            .into_iter()
            .map(prepare)
            .collect::<AuthResult<Vec<_>>>()?;

        let mut created = Vec::with_capacity(records.len());
        for record in records {
            self.store.create(&record).await?;
            tracing::info!(username = %record.username, role = %record.role, "Seeded user");
            created.push(record.username.into_inner());
        }

        Ok(SeedOutcome::Created(created))
    }
}

fn prepare(seed: SeedUser) -> AuthResult<UserRecord> {
    let username = UserName::new(&seed.username)
        .map_err(|e| AuthError::Internal(format!("Invalid seed username: {e}")))?;
    let password_hash = ClearTextPassword::new(seed.password)
        .map_err(|e| AuthError::Internal(format!("Invalid seed password for {username}: {e}")))?
        .hash()
        .map_err(|e| AuthError::Internal(e.to_string()))?;
    Ok(UserRecord::new(username, password_hash, seed.role))
}
