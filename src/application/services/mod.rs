//! # Application Services
//!
//! - [`FreightAggregationEngine`]: concurrent quote collection per leg
//! - [`ResultFormatter`]: channel-specific offer shaping

pub mod freight_aggregation;
pub mod result_formatter;

pub use freight_aggregation::{FreightAggregationEngine, LegQuotes, QuoteProviders};
pub use result_formatter::{
    Channel, MarketplaceEstimate, MarketplaceResponse, ResultFormatter, StorefrontOffer,
};
