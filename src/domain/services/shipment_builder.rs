//! # Shipment Builder
//!
//! Packs product line items into a single package.
//!
//! Items are stacked: every item is laid on its largest face, so the
//! package footprint is the largest footprint among items and the package
//! height is the sum of each item's smallest dimension times its quantity.

use crate::domain::entities::package::{MAX_DECLARED_VALUE, MIN_DECLARED_VALUE};
use crate::domain::entities::{Package, ProductLineItem};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::dealer_directory::DealerDirectory;
use crate::domain::value_objects::{PostalCode, Price};
use std::sync::Arc;

/// Builds packages from line items.
#[derive(Debug, Clone)]
pub struct ShipmentBuilder {
    warehouse: PostalCode,
    dealers: Arc<DealerDirectory>,
}

impl ShipmentBuilder {
    /// Creates a builder shipping from `warehouse` by default.
    #[must_use]
    pub fn new(warehouse: PostalCode, dealers: Arc<DealerDirectory>) -> Self {
        Self { warehouse, dealers }
    }

    /// Default origin.
    #[must_use]
    pub fn warehouse(&self) -> &PostalCode {
        &self.warehouse
    }

    /// Validates every item, failing on the first bad one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyShipment` for an empty list and
    /// `DomainError::InvalidProduct` for the first invalid item.
    pub fn validate(items: &[ProductLineItem]) -> DomainResult<()> {
        if items.is_empty() {
            return Err(DomainError::EmptyShipment);
        }
        items.iter().try_for_each(ProductLineItem::validate)
    }

    /// Builds one package covering `items`.
    ///
    /// # Arguments
    ///
    /// * `items` - Line items to pack
    /// * `destination` - Where the package goes
    /// * `origin` - Where it leaves from; the warehouse when `None`
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad item and field, or
    /// `DomainError::InvalidPackage` when the summed declared value leaves
    /// the accepted range.
    pub fn build(
        &self,
        items: &[ProductLineItem],
        destination: PostalCode,
        origin: Option<PostalCode>,
    ) -> DomainResult<Package> {
        Self::validate(items)?;

        let mut length = 0u32;
        let mut width = 0u32;
        let mut height = 0u32;
        let mut weight = 0u32;
        let mut value = Price::ZERO;
        let mut delay = 0u32;

        for item in items {
            let [largest, middle, smallest] = item.sorted_dimensions();
            length = length.max(largest);
            width = width.max(middle);
            height = height.saturating_add(smallest.saturating_mul(item.quantity));
            weight = weight.saturating_add(item.weight_g.saturating_mul(item.quantity));
            value = value.saturating_add(item.unit_price.saturating_mul(item.quantity));
            delay = delay.max(self.dealers.shipment_delay(&item.dealer, &item.stock_location));
        }

        if !(MIN_DECLARED_VALUE..=MAX_DECLARED_VALUE).contains(&value.get()) {
            return Err(DomainError::invalid_package("declared value", value));
        }

        let origin = origin.unwrap_or_else(|| self.warehouse.clone());
        let mut package = Package::new(origin, destination, (length, width, height), weight)?
            .with_declared_value(value)
            .with_shipment_delay(delay);

        if let Some(dealer) = common_dealer(items) {
            package = package.with_dealer(dealer);
        }

        Ok(package)
    }
}

/// Lowercase dealer shared by every item, if there is one.
fn common_dealer(items: &[ProductLineItem]) -> Option<String> {
    let mut dealers = items.iter().map(|i| i.dealer.trim().to_lowercase());
    let first = dealers.next()?;
    if first.is_empty() || dealers.any(|d| d != first) {
        return None;
    }
    Some(first)
}
