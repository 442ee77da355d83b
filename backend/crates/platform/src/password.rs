//! Account passwords
//!
//! Submitted passwords live in [`ClearTextPassword`] only for as long as it
//! takes to hash or verify them, and are wiped from memory on drop. What the
//! `users` table stores is a [`HashedPassword`]: an Argon2id PHC string.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Longest accepted password, counted in code points after normalization
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password is {actual} characters long, the limit is {max}")]
    TooLong { max: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Stored password hash is not a valid PHC string")]
    MalformedHash,
}

// Argon2id v19 with the crate defaults (m=19456, t=2, p=1)
fn argon2() -> Argon2<'static> {
    Argon2::default()
}

/// A password as typed by the caller
///
/// Not `Clone`, and `Debug` never prints the contents.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("admin123".to_string()).unwrap();
/// let stored = password.hash().unwrap();
/// assert!(stored.verify(&password));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// NFKC-normalizes the input, so full-width and half-width forms of the
    /// same characters are one password. Length is the only rule enforced.
    pub fn new(mut raw: String) -> Result<Self, PasswordError> {
        let password = Self(raw.nfkc().collect());
        raw.zeroize();

        match password.0.chars().count() {
            0 => Err(PasswordError::Empty),
            n if n > MAX_PASSWORD_LENGTH => Err(PasswordError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: n,
            }),
            _ => Ok(password),
        }
    }

    /// Hashes with a freshly generated salt
    pub fn hash(&self) -> Result<HashedPassword, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = argon2()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?
            .to_string();
        Ok(HashedPassword(phc))
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword(***)")
    }
}

/// Argon2id hash in PHC form, e.g. `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<digest>`
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Accepts a value read back from storage after checking it parses
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordError> {
        let phc = phc.into();
        match PasswordHash::new(&phc) {
            Ok(_) => Ok(Self(phc)),
            Err(_) => Err(PasswordError::MalformedHash),
        }
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// `false` for a wrong password and for an unparsable hash alike
    pub fn verify(&self, candidate: &ClearTextPassword) -> bool {
        PasswordHash::new(&self.0)
            .map(|parsed| {
                argon2()
                    .verify_password(candidate.0.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_length_limits() {
        assert_eq!(
            ClearTextPassword::new(String::new()).unwrap_err(),
            PasswordError::Empty
        );
        assert_eq!(
            ClearTextPassword::new("x".repeat(MAX_PASSWORD_LENGTH + 1)).unwrap_err(),
            PasswordError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: MAX_PASSWORD_LENGTH + 1,
            }
        );
        assert!(ClearTextPassword::new("x".repeat(MAX_PASSWORD_LENGTH)).is_ok());
        // seed accounts use short passwords
        assert!(ClearTextPassword::new("user123".to_string()).is_ok());
    }

    #[test]
    fn test_verify_accepts_only_the_original() {
        let stored = clear("admin123").hash().unwrap();
        assert!(stored.verify(&clear("admin123")));
        assert!(!stored.verify(&clear("admin124")));
        assert!(!stored.verify(&clear("Admin123")));
    }

    #[test]
    fn test_every_hash_gets_its_own_salt() {
        let pw = clear("admin123");
        let first = pw.hash().unwrap();
        let second = pw.hash().unwrap();
        assert_ne!(first, second);
        assert!(first.as_phc_string().starts_with("$argon2id$v=19$"));
    }

    #[test]
    fn test_fullwidth_input_matches_ascii() {
        let stored = clear("ｕｓｅｒ123").hash().unwrap();
        assert!(stored.verify(&clear("user123")));
    }

    #[test]
    fn test_stored_hash_survives_a_trip_through_the_database_column() {
        let column = clear("TestPassword123!").hash().unwrap().as_phc_string().to_owned();
        let restored = HashedPassword::from_phc_string(column).unwrap();
        assert!(restored.verify(&clear("TestPassword123!")));

        assert_eq!(
            HashedPassword::from_phc_string("plain-text-by-mistake").unwrap_err(),
            PasswordError::MalformedHash
        );
    }

    #[test]
    fn test_debug_output_is_masked() {
        let pw = clear("hunter2");
        assert_eq!(format!("{pw:?}"), "ClearTextPassword(***)");
        assert_eq!(format!("{:?}", pw.hash().unwrap()), "HashedPassword(***)");
    }
}
