//! Token Codec
//!
//! Stateless bearer tokens: HS256-signed JWTs carrying `{sub, role, iat, exp}`.
//! Nothing is stored server-side; a token is valid exactly when its signature
//! checks out and `now < exp`.
//!
//! Expiry is evaluated against the `now` passed by the caller rather than the
//! system clock, so the check is deterministic under test.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Malformed, wrong algorithm, bad signature, or unknown role
    #[error("Token is invalid")]
    Invalid,

    #[error("Token has expired")]
    Expired,

    #[error("Token could not be issued: {0}")]
    Issue(String),
}

/// Wire claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Decoded, verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub subject: String,
    pub role: UserRole,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies bearer tokens with the configured secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // exp is checked against the injected clock in `decode`
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(config.token_secret()),
            decoding: DecodingKey::from_secret(config.token_secret()),
            validation,
        }
    }

    /// Issue a token for `subject` valid from `now` for `ttl`
    pub fn issue(
        &self,
        subject: &str,
        role: UserRole,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        // Claims hold whole seconds; the reported expiry must match the embedded one
        let issued_at = DateTime::from_timestamp(now.timestamp(), 0)
            .ok_or_else(|| TokenError::Issue("Issue time out of range".to_string()))?;
        let ttl = i64::try_from(ttl.as_secs())
            .ok()
            .filter(|secs| *secs > 0)
            .and_then(chrono::TimeDelta::try_seconds)
            .ok_or_else(|| TokenError::Issue(format!("TTL must be at least one second (got {ttl:?})")))?;
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Issue("TTL out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            role: role.code().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Issue(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify `token` and check it against `now`
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<AuthToken, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                TokenError::Invalid
            })?;
        let claims = data.claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        let role = UserRole::from_code(&claims.role).ok_or(TokenError::Invalid)?;
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::Invalid)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Invalid)?;

        Ok(AuthToken {
            subject: claims.sub,
            role,
            issued_at,
            expires_at,
        })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &"HS256")
            .field("keys", &"[REDACTED]")
            .finish()
    }
}
