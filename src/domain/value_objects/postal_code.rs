//! # Postal Code
//!
//! Brazilian postal code (CEP) value object.
//!
//! A postal code is stored as its eight ASCII digits. Input may contain
//! hyphens or whitespace, which are stripped before validation.
//!
//! # Examples
//!
//! ```
//! use freight_quote::domain::value_objects::PostalCode;
//!
//! let cep = PostalCode::parse("31110-700").unwrap();
//! assert_eq!(cep.as_str(), "31110700");
//! assert!(PostalCode::parse("3111").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a postal code.
pub const POSTAL_CODE_LEN: usize = 8;

/// A validated eight-digit postal code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Parses a postal code, ignoring `-` and whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPostalCode` unless exactly eight digits
    /// remain.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let digits: String = input
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect();

        if digits.len() != POSTAL_CODE_LEN || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidPostalCode(input.to_string()));
        }

        Ok(Self(digits))
    }

    /// Returns the digits.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PostalCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(value: PostalCode) -> Self {
        value.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn strips_hyphen_and_spaces() {
        assert_eq!(PostalCode::parse(" 05422-010 ").unwrap().as_str(), "05422010");
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(PostalCode::parse("0542201").is_err());
        assert!(PostalCode::parse("054220100").is_err());
        assert!(PostalCode::parse("").is_err());
    }

    #[test]
    fn rejects_non_digits() {
        assert!(PostalCode::parse("0542201a").is_err());
    }

    #[test]
    fn serde_validates() {
        let cep: PostalCode = serde_json::from_str("\"31110-700\"").unwrap();
        assert_eq!(cep.to_string(), "31110700");
        assert!(serde_json::from_str::<PostalCode>("\"abc\"").is_err());
    }
}
