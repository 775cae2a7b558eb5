//! # Postal Code Resolution
//!
//! Resolves postal codes to addresses and regions.
//!
//! [`AddressLookup`] is the port to an address web service; [`GeoResolver`]
//! puts the shared cache in front of it:
//!
//! - `address:<postal>` keeps the resolved address
//! - `postal-region:<postal>` keeps the derived region

pub mod viacep;

pub use viacep::ViaCepClient;

use crate::domain::value_objects::{PostalCode, Region};
use crate::infrastructure::cache::{self, Cache, keys};
use crate::infrastructure::http_client::HttpError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Error type for postal code resolution.
#[derive(Debug, Clone, Error)]
pub enum GeoError {
    /// The address service does not know the postal code.
    #[error("postal code not found: {0}")]
    NotFound(String),

    /// The resolved state maps to no region.
    #[error("unknown state [{state}] for postal code {postal_code}")]
    UnknownState {
        /// Postal code looked up.
        postal_code: String,
        /// State returned.
        state: String,
    },

    /// Transport failure.
    #[error(transparent)]
    Http(#[from] HttpError),
}

/// Result type for postal code resolution.
pub type GeoResult<T> = Result<T, GeoError>;

/// Address of a postal code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code.
    pub postal_code: PostalCode,
    /// Street.
    #[serde(default)]
    pub street: String,
    /// District.
    #[serde(default)]
    pub district: String,
    /// City.
    pub city: String,
    /// Two-letter state code.
    pub state: String,
}

/// Port to an address web service.
#[async_trait]
pub trait AddressLookup: Send + Sync + fmt::Debug {
    /// Looks up the address of a postal code.
    ///
    /// # Errors
    ///
    /// Returns `GeoError::NotFound` for unknown postal codes, or a transport
    /// error.
    async fn lookup(&self, postal_code: &PostalCode) -> GeoResult<Address>;
}

/// Cached address and region resolution.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    lookup: Arc<dyn AddressLookup>,
    cache: Arc<dyn Cache>,
    address_ttl: Duration,
    region_ttl: Duration,
}

impl GeoResolver {
    /// Creates a resolver with the given entry lifetimes.
    #[must_use]
    pub fn new(
        lookup: Arc<dyn AddressLookup>,
        cache: Arc<dyn Cache>,
        address_ttl: Duration,
        region_ttl: Duration,
    ) -> Self {
        Self {
            lookup,
            cache,
            address_ttl,
            region_ttl,
        }
    }

    /// Resolves the address of a postal code.
    ///
    /// # Errors
    ///
    /// Returns a `GeoError` on a cache miss followed by a lookup failure.
    pub async fn address(&self, postal_code: &PostalCode) -> GeoResult<Address> {
        let key = keys::address(postal_code);
        if let Some(address) = cache::get_json::<Address>(self.cache.as_ref(), &key).await {
            debug!(%postal_code, "address cache hit");
            return Ok(address);
        }

        let address = self.lookup.lookup(postal_code).await?;
        cache::set_json(self.cache.as_ref(), &key, &address, self.address_ttl).await;
        Ok(address)
    }

    /// Resolves the region of a postal code.
    ///
    /// # Errors
    ///
    /// Returns `GeoError::UnknownState` if the state maps to no region, or
    /// any address resolution error.
    pub async fn region(&self, postal_code: &PostalCode) -> GeoResult<Region> {
        let key = keys::postal_region(postal_code);
        if let Some(region) = cache::get_json::<Region>(self.cache.as_ref(), &key).await {
            debug!(%postal_code, %region, "region cache hit");
            return Ok(region);
        }

        let address = self.address(postal_code).await?;
        let region = Region::from_state(&address.state).ok_or_else(|| GeoError::UnknownState {
            postal_code: postal_code.to_string(),
            state: address.state.clone(),
        })?;
        cache::set_json(self.cache.as_ref(), &key, &region, self.region_ttl).await;
        Ok(region)
    }
}
