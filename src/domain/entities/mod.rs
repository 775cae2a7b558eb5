//! # Domain Entities
//!
//! - [`ProductLineItem`]: one ordered product
//! - [`Package`]: physical shipment descriptor
//! - [`Quote`] and [`QuoteSet`]: provider output
//! - Rate table rows: [`RegionRate`], [`CourierRate`], [`DealerRate`]

pub mod package;
pub mod product;
pub mod quote;
pub mod rate;

pub use package::Package;
pub use product::ProductLineItem;
pub use quote::{Quote, QuoteSet};
pub use rate::{
    CourierRate, DealerRate, NewCourierRate, NewDealerRate, NewRegionRate, RateBracket, RegionRate,
};
