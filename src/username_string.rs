use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::lib_constants::MAX_USERNAME_LEN;

/// Validated account name. Usernames double as storage directory names,
/// so the accepted alphabet is deliberately narrow.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UsernameString(String);

#[derive(Debug, Error, Eq, PartialEq)]
pub enum UsernameParseError {
    #[error("username is empty")]
    Empty,

    #[error("username is longer than {MAX_USERNAME_LEN} characters")]
    TooLong,

    #[error("username contains a character outside [a-z0-9._-]")]
    InvalidCharacter,
}

impl FromStr for UsernameString {
    type Err = UsernameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(UsernameParseError::Empty);
        }
        if s.len() > MAX_USERNAME_LEN {
            return Err(UsernameParseError::TooLong);
        }
        let valid = s.chars().all(|c|
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || matches!(c, '.' | '_' | '-')
        );
        if !valid {
            return Err(UsernameParseError::InvalidCharacter);
        }
        Ok(UsernameString(s.to_string()))
    }
}

impl Deref for UsernameString {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0[..]
    }
}

impl AsRef<str> for UsernameString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UsernameString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for UsernameString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UsernameString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UsernameString::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(UsernameString::from_str("abc").is_ok());
        assert!(UsernameString::from_str("a.b_c-9").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            UsernameString::from_str(""),
            Err(UsernameParseError::Empty),
        );
    }

    #[test]
    fn rejects_uppercase_and_separators() {
        assert_eq!(
            UsernameString::from_str("Abc"),
            Err(UsernameParseError::InvalidCharacter),
        );
        assert_eq!(
            UsernameString::from_str("a/b"),
            Err(UsernameParseError::InvalidCharacter),
        );
    }

    #[test]
    fn rejects_overlong() {
        let long = "a".repeat(MAX_USERNAME_LEN + 1);
        assert_eq!(
            UsernameString::from_str(&long),
            Err(UsernameParseError::TooLong),
        );
    }
}
