//! PostgreSQL Repository Implementations

use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::user::UserRecord;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{user_name::UserName, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                username,
                password_hash,
                role,
                enabled
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn count(&self) -> AuthResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn create(&self, user: &UserRecord) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                role,
                enabled
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.storage_code())
        .bind(user.enabled)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    username: String,
    password_hash: String,
    role: String,
    enabled: bool,
}

impl UserRow {
    fn into_record(self) -> AuthResult<UserRecord> {
        let username = UserName::new(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid stored username: {}", e)))?;

        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored hash for {}: {}", username, e)))?;

        let role = UserRole::from_storage(&self.role).ok_or_else(|| {
            AuthError::Internal(format!("Invalid stored role for {}: {}", username, self.role))
        })?;

        Ok(UserRecord {
            username,
            password_hash,
            role,
            enabled: self.enabled,
        })
    }
}
