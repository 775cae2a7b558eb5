//! # Result Formatter
//!
//! Shapes combined offers for each calling channel.
//!
//! - **Storefront**: full service fields, courier included, dealer deadline
//!   surcharge applied.
//! - **Marketplace**: carrier, price and deadline only, courier excluded,
//!   shipment delay added to the deadline.

use crate::domain::entities::{Package, Quote};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calling channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Own storefront.
    Storefront,
    /// External price-comparison marketplace.
    Marketplace,
}

impl Channel {
    /// Whether local courier offers are shown on this channel.
    #[must_use]
    pub const fn includes_courier(self) -> bool {
        matches!(self, Self::Storefront)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storefront => write!(f, "storefront"),
            Self::Marketplace => write!(f, "marketplace"),
        }
    }
}

/// One storefront offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontOffer {
    /// Carrier name.
    pub carrier: String,
    /// Carrier service code; empty for table carriers.
    pub service_code: String,
    /// Service description.
    pub service_desc: String,
    /// Price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Deadline in days.
    pub deadline: u32,
}

/// One marketplace estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceEstimate {
    /// Carrier name.
    pub carrier: String,
    /// Price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Deadline in days, shipment delay included.
    pub deadline: u32,
}

/// Marketplace response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceResponse {
    /// Request identifier: the request's Unix timestamp.
    pub id: String,
    /// Estimates.
    pub estimates: Vec<MarketplaceEstimate>,
}

/// Formats offers for each channel.
#[derive(Debug, Clone)]
pub struct ResultFormatter;

impl ResultFormatter {
    /// Storefront offers.
    ///
    /// Every offer gains exactly `surcharge_days`, the largest deadline
    /// surcharge among the order's dealers.
    #[must_use]
    pub fn storefront(offers: &[Quote], surcharge_days: u32) -> Vec<StorefrontOffer> {
        offers
            .iter()
            .map(|q| StorefrontOffer {
                carrier: q.carrier().to_string(),
                service_code: q.service_code().to_string(),
                service_desc: q.service_description().to_string(),
                price: q.price().get(),
                deadline: q.deadline_days().saturating_add(surcharge_days),
            })
            .collect()
    }

    /// Marketplace response.
    ///
    /// Courier offers are dropped here as well, so callers may pass
    /// storefront-shaped offer lists.
    #[must_use]
    pub fn marketplace(offers: &[Quote], package: &Package, requested_at: DateTime<Utc>) -> MarketplaceResponse {
        let estimates = offers
            .iter()
            .filter(|q| !q.kind().is_courier())
            .map(|q| q.clone().without_service().delayed_by(package.shipment_delay_days()))
            .map(|q| MarketplaceEstimate {
                carrier: q.carrier().to_string(),
                price: q.price().get(),
                deadline: q.deadline_days(),
            })
            .collect();

        MarketplaceResponse {
            id: requested_at.timestamp().to_string(),
            estimates,
        }
    }
}
