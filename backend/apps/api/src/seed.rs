//! Initial account provisioning

use std::sync::Arc;

use anyhow::Context;
use auth::UserRole;
use auth::application::{SeedOutcome, SeedUser, SeedUsersUseCase};
use auth::domain::CredentialStore;

/// Create `admin` and `user` when the credential store is empty
pub async fn seed_default_accounts<S>(
    store: S,
    admin_password: &str,
    user_password: &str,
) -> anyhow::Result<SeedOutcome>
where
    S: CredentialStore,
{
    let outcome = SeedUsersUseCase::new(Arc::new(store))
        .execute(vec![
            SeedUser {
                username: "admin".to_string(),
                password: admin_password.to_string(),
                role: UserRole::Admin,
            },
            SeedUser {
                username: "user".to_string(),
                password: user_password.to_string(),
                role: UserRole::User,
            },
        ])
        .await
        .context("Failed to seed default accounts")?;

    if let SeedOutcome::Created(names) = &outcome {
        tracing::info!(users = ?names, "Default accounts created");
    }
    Ok(outcome)
}
