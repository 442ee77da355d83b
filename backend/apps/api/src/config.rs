//! Process configuration
//!
//! Read once from the environment at startup and never mutated afterwards.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_TTL_MS: u64 = 86_400_000;
const DEFAULT_UPLOAD_DIR: &str = "uploads/images";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
const DEFAULT_USER_PASSWORD: &str = "user123";

pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub upload_dir: PathBuf,
    /// `None` allows any origin
    pub frontend_origins: Option<Vec<String>>,
    pub seed_admin_password: String,
    pub seed_user_password: String,
}

impl AppConfig {
    /// Load from process environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    ///
    /// Without `JWT_SECRET`, debug builds fall back to a random secret;
    /// release builds refuse to start.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be a socket address")?;

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let ttl_ms = match var("JWT_EXPIRATION_MS") {
            Some(v) => v
                .parse::<u64>()
                .context("JWT_EXPIRATION_MS must be an integer number of milliseconds")?,
            None => DEFAULT_TOKEN_TTL_MS,
        };
        let ttl = Duration::from_millis(ttl_ms);

        let auth = match var("JWT_SECRET") {
            Some(secret) => AuthConfig::new(secret.into_bytes(), ttl)
                .context("Invalid JWT_SECRET or JWT_EXPIRATION_MS")?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this run");
                AuthConfig::with_random_secret()
                    .with_ttl(ttl)
                    .context("Invalid JWT_EXPIRATION_MS")?
            }
            None => bail!("JWT_SECRET must be set in production"),
        };

        let frontend_origins = var("FRONTEND_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect()
        });

        Ok(Self {
            database_url,
            bind_addr,
            database_max_connections,
            auth,
            upload_dir: var("UPLOAD_DIR")
                .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            frontend_origins,
            seed_admin_password: var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            seed_user_password: var("SEED_USER_PASSWORD")
                .unwrap_or_else(|| DEFAULT_USER_PASSWORD.to_string()),
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[REDACTED]")
            .field("bind_addr", &self.bind_addr)
            .field("database_max_connections", &self.database_max_connections)
            .field("auth", &self.auth)
            .field("upload_dir", &self.upload_dir)
            .field("frontend_origins", &self.frontend_origins)
            .field("seed_admin_password", &"[REDACTED]")
            .field("seed_user_password", &"[REDACTED]")
            .finish()
    }
}
