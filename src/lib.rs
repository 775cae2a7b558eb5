//! # Freight Quote
//!
//! Freight quote aggregation service. Combines postal carrier, regional
//! rate table, local courier and dealer rate table quotes into the offers
//! shown to a storefront or a marketplace.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain`): packages, quotes, rate rows and the pure services
//!   that build shipments, plan legs and combine leg quotes
//! - **Application Layer** (`application`): the aggregation engine, result formatter
//!   and the estimate-freight use case
//! - **Infrastructure Layer** (`infrastructure`): quote providers, cache, postal code
//!   resolution, product catalog and rate repositories
//! - **API Layer** (`api`): axum routes with HTTP Basic authentication
//!
//! ## Example
//!
//! ```rust,ignore
//! use freight_quote::application::use_cases::EstimateFreightUseCase;
//!
//! let offers = EstimateFreightUseCase::new(/* dependencies */)
//!     .estimate_products(&items, destination)
//!     .await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
