//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared read-only behind an `Arc`.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Minimum HMAC key length for HS256
pub const MIN_SECRET_BYTES: usize = 32;

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 3600);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthConfigError {
    #[error("Token secret must be at least {MIN_SECRET_BYTES} bytes (got {0})")]
    SecretTooShort(usize),

    /// Tokens carry expiry in whole seconds
    #[error("Token TTL must be a whole number of seconds, at least 1s (got {0:?})")]
    InvalidTtl(Duration),
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 signing secret
    token_secret: Vec<u8>,
    /// Token lifetime
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(secret: impl Into<Vec<u8>>, token_ttl: Duration) -> Result<Self, AuthConfigError> {
        let token_secret = secret.into();
        if token_secret.len() < MIN_SECRET_BYTES {
            return Err(AuthConfigError::SecretTooShort(token_secret.len()));
        }
        check_ttl(token_ttl)?;
        Ok(Self {
            token_secret,
            token_ttl,
        })
    }

    /// Create config with a random secret (for development and tests)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 64];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// Same config with another TTL
    pub fn with_ttl(mut self, token_ttl: Duration) -> Result<Self, AuthConfigError> {
        check_ttl(token_ttl)?;
        self.token_ttl = token_ttl;
        Ok(self)
    }

    pub fn token_secret(&self) -> &[u8] {
        &self.token_secret
    }
}

fn check_ttl(ttl: Duration) -> Result<(), AuthConfigError> {
    if ttl.as_secs() == 0 || ttl.subsec_nanos() != 0 {
        return Err(AuthConfigError::InvalidTtl(ttl));
    }
    Ok(())
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::with_random_secret()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        let result = AuthConfig::new(b"too-short".to_vec(), DEFAULT_TOKEN_TTL);
        assert_eq!(result.unwrap_err(), AuthConfigError::SecretTooShort(9));
    }

    #[test]
    fn test_ttl_must_be_whole_seconds() {
        for ttl in [
            Duration::ZERO,
            Duration::from_millis(500),
            Duration::from_millis(1500),
        ] {
            assert_eq!(
                AuthConfig::new([7u8; 32], ttl).unwrap_err(),
                AuthConfigError::InvalidTtl(ttl)
            );
            assert_eq!(
                AuthConfig::with_random_secret().with_ttl(ttl).unwrap_err(),
                AuthConfigError::InvalidTtl(ttl)
            );
        }

        let config = AuthConfig::new([7u8; 32], Duration::from_secs(1)).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(1));
        let config = config.with_ttl(Duration::from_millis(60_000)).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_ne!(a.token_secret(), b.token_secret());
        assert_eq!(a.token_ttl, DEFAULT_TOKEN_TTL);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("s".repeat(32), DEFAULT_TOKEN_TTL).unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("ssss"));
    }
}
