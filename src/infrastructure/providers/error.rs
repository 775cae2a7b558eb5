//! # Provider Errors
//!
//! Error types for quote provider operations.
//!
//! Providers never surface these to callers: they are logged and turned
//! into a failed quote set.
//!
//! # Examples
//!
//! ```
//! use freight_quote::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::out_of_range("weight", 60_000);
//! assert!(error.is_out_of_range());
//! ```

use crate::infrastructure::geo::GeoError;
use crate::infrastructure::http_client::HttpError;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Error type for quote provider operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Package is outside the carrier's physical limits.
    #[error("package out of range: {field} [{value}]")]
    OutOfRange {
        /// Offending measure.
        field: &'static str,
        /// Its value.
        value: u32,
    },

    /// No rate row covers the package.
    #[error("no rate for {0}")]
    NoRate(String),

    /// Package carries no dealer identity.
    #[error("package has no dealer")]
    MissingDealer,

    /// The destination is outside the served area.
    #[error("destination not served: {0}")]
    NotServed(String),

    /// Remote reply could not be understood.
    #[error("provider protocol error: {0}")]
    Protocol(String),

    /// Transport failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Postal code resolution failure.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Rate table failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ProviderError {
    /// Creates an out of range error.
    #[must_use]
    pub fn out_of_range(field: &'static str, value: u32) -> Self {
        Self::OutOfRange { field, value }
    }

    /// Creates a no rate error.
    #[must_use]
    pub fn no_rate(what: impl Into<String>) -> Self {
        Self::NoRate(what.into())
    }

    /// Creates a not served error.
    #[must_use]
    pub fn not_served(what: impl Into<String>) -> Self {
        Self::NotServed(what.into())
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Returns true for packages the carrier cannot take.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

/// Result type for quote provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
