//! # Price Value Object
//!
//! Non-negative monetary amount in reais.
//!
//! Rate tables store integer cents; carriers answer with decimal strings.
//! Both end up as a [`Price`] wrapping a [`Decimal`].
//!
//! # Examples
//!
//! ```
//! use freight_quote::domain::value_objects::Price;
//!
//! let a = Price::from_cents(1250).unwrap();
//! let b = Price::from_cents(750).unwrap();
//! assert_eq!(a.saturating_add(b).to_string(), "20.00");
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated, non-negative price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero price constant.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPackage` if the value is negative.
    pub fn from_decimal(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::invalid_package("price", value));
        }
        Ok(Self(value))
    }

    /// Creates a price from integer cents.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPackage` if `cents` is negative.
    pub fn from_cents(cents: i64) -> DomainResult<Self> {
        Self::from_decimal(Decimal::new(cents, 2))
    }

    /// Returns the inner decimal.
    #[inline]
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }

    /// Returns true if the price is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the price is strictly positive.
    #[inline]
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Adds two prices, saturating at the decimal maximum.
    #[inline]
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiplies by an item quantity, saturating at the decimal maximum.
    #[inline]
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}
