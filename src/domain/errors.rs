//! # Domain Errors
//!
//! Validation failures raised while turning order data into packages.
//!
//! Every variant is a caller error: the request is rejected before any
//! quote provider is contacted.

use thiserror::Error;

/// Error type for domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A product line item carries an out-of-range field.
    #[error("Invalid product [{product_id}] {field} [{value}]")]
    InvalidProduct {
        /// Product identifier supplied by the caller.
        product_id: String,
        /// Name of the offending field.
        field: &'static str,
        /// Offending value, as received.
        value: String,
    },

    /// A packed package carries an out-of-range field.
    #[error("Invalid package {field} [{value}]")]
    InvalidPackage {
        /// Name of the offending field.
        field: &'static str,
        /// Offending value, as received.
        value: String,
    },

    /// Postal code is not eight digits.
    #[error("Invalid postal code [{0}]")]
    InvalidPostalCode(String),

    /// No line items were supplied.
    #[error("shipment has no products")]
    EmptyShipment,

    /// Unknown enumeration value.
    #[error("invalid {kind} value: {value}")]
    InvalidEnumValue {
        /// Enumeration name.
        kind: &'static str,
        /// Offending value.
        value: String,
    },
}

impl DomainError {
    /// Creates an invalid product error.
    #[must_use]
    pub fn invalid_product(
        product_id: impl Into<String>,
        field: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::InvalidProduct {
            product_id: product_id.into(),
            field,
            value: value.to_string(),
        }
    }

    /// Creates an invalid package error.
    #[must_use]
    pub fn invalid_package(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidPackage {
            field,
            value: value.to_string(),
        }
    }

    /// Creates an invalid enum value error.
    #[must_use]
    pub fn invalid_enum(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            kind,
            value: value.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_product_names_item_and_field() {
        let err = DomainError::invalid_product("abc123", "length", 0);
        assert_eq!(err.to_string(), "Invalid product [abc123] length [0]");
    }

    #[test]
    fn invalid_postal_code_display() {
        let err = DomainError::InvalidPostalCode("123".to_string());
        assert!(err.to_string().contains("123"));
    }
}
