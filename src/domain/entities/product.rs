//! # Product Line Item
//!
//! One ordered product with its unit dimensions and quantity.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::Price;
use rust_decimal::Decimal;

/// Lowest accepted unit price.
pub const MIN_UNIT_PRICE: Decimal = Decimal::ONE;

/// Highest accepted unit price.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// An ordered product.
///
/// Dimensions are centimetres, weight is grams, price is per unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLineItem {
    /// Product identifier.
    pub id: String,
    /// Dealer supplying the product; empty when stocked in the warehouse.
    pub dealer: String,
    /// Dealer stock location; may be empty.
    pub stock_location: String,
    /// Unit length in cm.
    pub length_cm: u32,
    /// Unit width in cm.
    pub width_cm: u32,
    /// Unit height in cm.
    pub height_cm: u32,
    /// Unit weight in grams.
    pub weight_g: u32,
    /// Unit price.
    pub unit_price: Price,
    /// Ordered quantity.
    pub quantity: u32,
}

impl ProductLineItem {
    /// Creates a line item with quantity one and no dealer.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        dimensions_cm: (u32, u32, u32),
        weight_g: u32,
        unit_price: Price,
    ) -> Self {
        let (length_cm, width_cm, height_cm) = dimensions_cm;
        Self {
            id: id.into(),
            dealer: String::new(),
            stock_location: String::new(),
            length_cm,
            width_cm,
            height_cm,
            weight_g,
            unit_price,
            quantity: 1,
        }
    }

    /// Sets the dealer and stock location.
    #[must_use]
    pub fn with_dealer(mut self, dealer: impl Into<String>, stock_location: impl Into<String>) -> Self {
        self.dealer = dealer.into();
        self.stock_location = stock_location.into();
        self
    }

    /// Sets the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Checks every field against its bounds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProduct` naming the first bad field.
    pub fn validate(&self) -> DomainResult<()> {
        let checks = [
            ("length", self.length_cm),
            ("width", self.width_cm),
            ("height", self.height_cm),
            ("weight", self.weight_g),
            ("quantity", self.quantity),
        ];
        if let Some((field, value)) = checks.into_iter().find(|(_, v)| *v == 0) {
            return Err(DomainError::invalid_product(&self.id, field, value));
        }

        let price = self.unit_price.get();
        if !(MIN_UNIT_PRICE..=MAX_UNIT_PRICE).contains(&price) {
            return Err(DomainError::invalid_product(&self.id, "price", price));
        }

        Ok(())
    }

    /// Returns the unit dimensions sorted largest first.
    #[must_use]
    pub fn sorted_dimensions(&self) -> [u32; 3] {
        let mut dims = [self.length_cm, self.width_cm, self.height_cm];
        dims.sort_unstable_by(|a, b| b.cmp(a));
        dims
    }
}
