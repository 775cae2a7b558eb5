//! # Persistence Layer
//!
//! Rate table repositories.
//!
//! ## Repository Traits (Ports)
//!
//! - [`RegionRateRepository`]: regional rates
//! - [`CourierRateRepository`]: local courier rates
//! - [`DealerRateRepository`]: dealer rates
//!
//! ## Implementations
//!
//! - `in_memory`: in-memory tables for tests and local runs
//! - `postgres`: PostgreSQL tables via sqlx

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    CourierRateRepository, DealerRateRepository, RegionRateRepository, RepositoryError,
    RepositoryResult,
};
