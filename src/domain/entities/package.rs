//! # Package
//!
//! Physical shipment descriptor sent to quote providers.
//!
//! A package is one parcel travelling between two postal codes. It is built
//! either from product line items by the shipment builder or directly from
//! a packed-dimensions request.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{PostalCode, Price};
use rust_decimal::Decimal;
use std::fmt;

/// Lowest declared value of a package built from line items.
pub const MIN_DECLARED_VALUE: Decimal = Decimal::ONE;

/// Highest declared value of a package built from line items.
pub const MAX_DECLARED_VALUE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// A validated shipment descriptor.
///
/// # Invariants
///
/// - Length, width, height and weight are strictly positive
/// - Packages built from line items declare a value within
///   [`MIN_DECLARED_VALUE`]..=[`MAX_DECLARED_VALUE`]; packed packages
///   declare none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    origin: PostalCode,
    destination: PostalCode,
    length_cm: u32,
    width_cm: u32,
    height_cm: u32,
    weight_g: u32,
    declared_value: Price,
    dealer: Option<String>,
    shipment_delay_days: u32,
}

impl Package {
    /// Creates a package.
    ///
    /// # Arguments
    ///
    /// * `dimensions_cm` - `(length, width, height)` in centimetres
    /// * `weight_g` - Weight in grams
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPackage` if any dimension or the weight
    /// is zero.
    pub fn new(
        origin: PostalCode,
        destination: PostalCode,
        dimensions_cm: (u32, u32, u32),
        weight_g: u32,
    ) -> DomainResult<Self> {
        let (length_cm, width_cm, height_cm) = dimensions_cm;
        for (field, value) in [
            ("length", length_cm),
            ("width", width_cm),
            ("height", height_cm),
            ("weight", weight_g),
        ] {
            if value == 0 {
                return Err(DomainError::invalid_package(field, value));
            }
        }

        Ok(Self {
            origin,
            destination,
            length_cm,
            width_cm,
            height_cm,
            weight_g,
            declared_value: Price::ZERO,
            dealer: None,
            shipment_delay_days: 0,
        })
    }

    /// Sets the declared value.
    #[must_use]
    pub fn with_declared_value(mut self, value: Price) -> Self {
        self.declared_value = value;
        self
    }

    /// Sets the source dealer.
    #[must_use]
    pub fn with_dealer(mut self, dealer: impl Into<String>) -> Self {
        let dealer = dealer.into();
        self.dealer = (!dealer.trim().is_empty()).then_some(dealer);
        self
    }

    /// Sets the minimum lead time before the parcel can ship.
    #[must_use]
    pub fn with_shipment_delay(mut self, days: u32) -> Self {
        self.shipment_delay_days = days;
        self
    }

    /// Origin postal code.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &PostalCode {
        &self.origin
    }

    /// Destination postal code.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &PostalCode {
        &self.destination
    }

    /// Length in cm.
    #[inline]
    #[must_use]
    pub fn length_cm(&self) -> u32 {
        self.length_cm
    }

    /// Width in cm.
    #[inline]
    #[must_use]
    pub fn width_cm(&self) -> u32 {
        self.width_cm
    }

    /// Height in cm.
    #[inline]
    #[must_use]
    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    /// Weight in grams.
    #[inline]
    #[must_use]
    pub fn weight_g(&self) -> u32 {
        self.weight_g
    }

    /// Declared value.
    #[inline]
    #[must_use]
    pub fn declared_value(&self) -> Price {
        self.declared_value
    }

    /// Source dealer, if any.
    #[inline]
    #[must_use]
    pub fn dealer(&self) -> Option<&str> {
        self.dealer.as_deref()
    }

    /// Shipment delay in days.
    #[inline]
    #[must_use]
    pub fn shipment_delay_days(&self) -> u32 {
        self.shipment_delay_days
    }

    /// Sum of the three dimensions in cm.
    #[must_use]
    pub fn dimension_sum(&self) -> u32 {
        self.length_cm
            .saturating_add(self.width_cm)
            .saturating_add(self.height_cm)
    }

    /// The three dimensions as `[length, width, height]`.
    #[must_use]
    pub fn dimensions(&self) -> [u32; 3] {
        [self.length_cm, self.width_cm, self.height_cm]
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}->{} {}x{}x{}cm {}g",
            self.origin, self.destination, self.length_cm, self.width_cm, self.height_cm, self.weight_g
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cep(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    #[test]
    fn rejects_zero_weight() {
        let result = Package::new(cep("31110700"), cep("01310100"), (10, 10, 10), 0);
        assert_eq!(
            result.unwrap_err(),
            DomainError::invalid_package("weight", 0)
        );
    }

    #[test]
    fn blank_dealer_is_none() {
        let pkg = Package::new(cep("31110700"), cep("01310100"), (10, 10, 10), 100)
            .unwrap()
            .with_dealer("  ");
        assert!(pkg.dealer().is_none());
    }

    #[test]
    fn dimension_sum() {
        let pkg = Package::new(cep("31110700"), cep("01310100"), (30, 20, 10), 100).unwrap();
        assert_eq!(pkg.dimension_sum(), 60);
        assert_eq!(pkg.to_string(), "31110700->01310100 30x20x10cm 100g");
    }
}
