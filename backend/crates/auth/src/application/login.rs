//! Login Use Case
//!
//! Verifies a username/password pair and issues a bearer token.

use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc};
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::application::token_codec::TokenCodec;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Hash checked when the user does not exist, so a miss costs the same as a
/// wrong password.
static DUMMY_HASH: LazyLock<Option<HashedPassword>> = LazyLock::new(|| {
    ClearTextPassword::new("timing-equalizer-not-a-password".to_string())
        .ok()
        .and_then(|p| p.hash().ok())
});

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub token: String,
    pub username: String,
    /// Role without the storage prefix
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

/// Login use case
pub struct LoginUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    codec: Arc<TokenCodec>,
    config: Arc<AuthConfig>,
}

impl<S> LoginUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, codec: Arc<TokenCodec>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            codec,
            config,
        }
    }

    /// Unknown user, disabled user and wrong password all fail with
    /// [`AuthError::InvalidCredentials`].
    pub async fn execute(&self, input: LoginInput, now: DateTime<Utc>) -> AuthResult<LoginOutput> {
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        let username =
            UserName::new(&input.username).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(user) = self.store.find_by_username(&username).await? else {
            if let Some(dummy) = DUMMY_HASH.as_ref() {
                let _ = dummy.verify(&password);
            }
            tracing::debug!(username = %username, "Login for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let password_valid = user.password_hash.verify(&password);
        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.can_login() {
            tracing::debug!(username = %username, "Login for disabled user");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .codec
            .issue(
                user.username.as_str(),
                user.role,
                now,
                self.config.token_ttl,
            )
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(
            username = %user.username,
            role = %user.role,
            expires_at = %issued.expires_at,
            "User logged in"
        );

        Ok(LoginOutput {
            token: issued.token,
            username: user.username.into_inner(),
            role: user.role,
            expires_at: issued.expires_at,
        })
    }
}
