//! # Repository Traits
//!
//! Port definitions for rate table persistence.
//!
//! # Available Repositories
//!
//! - [`RegionRateRepository`]: regional rates by region and weight bracket
//! - [`CourierRateRepository`]: local courier rates by city
//! - [`DealerRateRepository`]: dealer rates by dealer and weight bracket
//!
//! # Examples
//!
//! ```ignore
//! use freight_quote::infrastructure::persistence::traits::RegionRateRepository;
//!
//! async fn cheapest_bracket(repo: &impl RegionRateRepository) {
//!     let rows = repo.find_bracket(Region::South, 1500).await?;
//!     println!("{} rates in bracket", rows.len());
//! }
//! ```

use crate::domain::entities::{
    CourierRate, DealerRate, NewCourierRate, NewDealerRate, NewRegionRate, RegionRate,
};
use crate::domain::value_objects::Region;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with key {key} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Business key.
        key: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Stored data could not be mapped to an entity.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            key: key.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for regional rates.
#[async_trait]
pub trait RegionRateRepository: Send + Sync + fmt::Debug {
    /// Inserts a rate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if `(region, weight, deadline)`
    /// already exists.
    async fn create(&self, rate: &NewRegionRate) -> RepositoryResult<RegionRate>;

    /// Gets a rate by id; `None` if missing.
    async fn get(&self, id: i64) -> RepositoryResult<Option<RegionRate>>;

    /// Lists every rate ordered by region, weight and deadline.
    async fn get_all(&self) -> RepositoryResult<Vec<RegionRate>>;

    /// Replaces a rate's fields; `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the new key clashes with
    /// another row.
    async fn update(&self, id: i64, rate: &NewRegionRate) -> RepositoryResult<Option<RegionRate>>;

    /// Deletes a rate. Returns true if it existed.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;

    /// Rows of the smallest weight bracket holding `weight_g`, by deadline.
    async fn find_bracket(&self, region: Region, weight_g: u32) -> RepositoryResult<Vec<RegionRate>>;
}

/// Repository for local courier rates.
#[async_trait]
pub trait CourierRateRepository: Send + Sync + fmt::Debug {
    /// Inserts a rate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if `(state, city)` already exists.
    async fn create(&self, rate: &NewCourierRate) -> RepositoryResult<CourierRate>;

    /// Gets a rate by id; `None` if missing.
    async fn get(&self, id: i64) -> RepositoryResult<Option<CourierRate>>;

    /// Lists every rate ordered by state and city.
    async fn get_all(&self) -> RepositoryResult<Vec<CourierRate>>;

    /// Replaces a rate's fields; `None` if missing.
    async fn update(&self, id: i64, rate: &NewCourierRate) -> RepositoryResult<Option<CourierRate>>;

    /// Deletes a rate. Returns true if it existed.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;

    /// Rate for a lowercase state and normalized city.
    async fn find_by_city(&self, state: &str, city_norm: &str)
    -> RepositoryResult<Option<CourierRate>>;
}

/// Repository for dealer rates.
#[async_trait]
pub trait DealerRateRepository: Send + Sync + fmt::Debug {
    /// Inserts a rate.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if `(dealer, weight, deadline)`
    /// already exists.
    async fn create(&self, rate: &NewDealerRate) -> RepositoryResult<DealerRate>;

    /// Gets a rate by id; `None` if missing.
    async fn get(&self, id: i64) -> RepositoryResult<Option<DealerRate>>;

    /// Lists every rate ordered by dealer, weight and deadline.
    async fn get_all(&self) -> RepositoryResult<Vec<DealerRate>>;

    /// Replaces a rate's fields; `None` if missing.
    async fn update(&self, id: i64, rate: &NewDealerRate) -> RepositoryResult<Option<DealerRate>>;

    /// Deletes a rate. Returns true if it existed.
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;

    /// Rows of the smallest weight bracket holding `weight_g` for a
    /// lowercase dealer, by deadline.
    async fn find_bracket(&self, dealer: &str, weight_g: u32) -> RepositoryResult<Vec<DealerRate>>;
}
