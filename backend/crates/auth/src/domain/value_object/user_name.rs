//! User Name Value Object
//!
//! ログインに使う識別子。アカウントは運用側で登録されるため、
//! 登録時のルール（予約語、文字種）はここでは持たず、照合に必要な
//! 正規化と最低限の健全性チェックだけを行う。
//!
//! ## 不変条件
//! - NFKC 正規化・前後空白除去後に空でない
//! - 長さ: USER_NAME_MAX_LENGTH 文字以下
//! - 制御文字を含まない
//! - 大文字小文字は区別する（保存値と完全一致で照合）

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too long (maximum: USER_NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// User name contains a control character
    ControlCharacter { position: usize },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username is required"),
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::ControlCharacter { position } => {
                write!(f, "Username contains a control character at position {position}")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Normalized user name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(position) = normalized.chars().position(char::is_control) {
            return Err(UserNameError::ControlCharacter { position });
        }

        Ok(Self(normalized))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({})", self.0)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_normalizes() {
        assert_eq!(UserName::new("  admin ").unwrap().as_str(), "admin");
        // Fullwidth letters fold to ASCII under NFKC
        assert_eq!(UserName::new("ａｄｍｉｎ").unwrap().as_str(), "admin");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_ne!(UserName::new("Admin").unwrap(), UserName::new("admin").unwrap());
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
    }

    #[test]
    fn test_too_long_rejected() {
        let result = UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1));
        assert!(matches!(result, Err(UserNameError::TooLong { .. })));
    }

    #[test]
    fn test_control_character_rejected() {
        let result = UserName::new("ad\u{0}min");
        assert_eq!(
            result.unwrap_err(),
            UserNameError::ControlCharacter { position: 2 }
        );
    }
}
