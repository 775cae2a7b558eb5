//! # Cache Store
//!
//! Shared key/value store with per-entry expiry.
//!
//! Derived pricing and address lookups are cached across requests. Values
//! are JSON strings; the last write wins. Cache failures never fail a
//! request: reads degrade to misses and writes are dropped.
//!
//! # Key Layout
//!
//! | Key | Value |
//! |-----|-------|
//! | `postal-region:<postal>` | region name |
//! | `address:<postal>` | resolved address |
//! | `national-carrier-quote:<origin>:<dest>:<LxWxH>:<weight>` | quote list |

pub mod in_memory;
pub mod redis_cache;

pub use in_memory::InMemoryCache;
pub use redis_cache::RedisCache;

use crate::domain::entities::Package;
use crate::domain::value_objects::PostalCode;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Error type for cache operations.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// Could not reach the store.
    #[error("cache connection error: {0}")]
    Connection(String),

    /// Store rejected a command.
    #[error("cache command error: {0}")]
    Command(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value store with expiry.
#[async_trait]
pub trait Cache: Send + Sync + fmt::Debug {
    /// Reads a live entry.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Writes an entry that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}

/// Reads and decodes a JSON entry, treating every failure as a miss.
pub async fn get_json<T: DeserializeOwned>(cache: &dyn Cache, key: &str) -> Option<T> {
    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding undecodable cache entry");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, error = %e, "cache read failed");
            None
        }
    }
}

/// Encodes and writes a JSON entry, logging failures.
pub async fn set_json<T: Serialize + ?Sized>(cache: &dyn Cache, key: &str, value: &T, ttl: Duration) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "cache value not serializable");
            return;
        }
    };
    if let Err(e) = cache.set(key, &raw, ttl).await {
        warn!(key, error = %e, "cache write failed");
    }
}

/// Cache key builders.
pub mod keys {
    use super::{Package, PostalCode};

    /// Region of a postal code.
    #[must_use]
    pub fn postal_region(postal: &PostalCode) -> String {
        format!("postal-region:{postal}")
    }

    /// Address of a postal code.
    #[must_use]
    pub fn address(postal: &PostalCode) -> String {
        format!("address:{postal}")
    }

    /// National carrier quotes for a package.
    #[must_use]
    pub fn national_quote(package: &Package) -> String {
        format!(
            "national-carrier-quote:{}:{}:{}x{}x{}:{}",
            package.origin(),
            package.destination(),
            package.length_cm(),
            package.width_cm(),
            package.height_cm(),
            package.weight_g()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cep(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    #[test]
    fn key_layout() {
        let pkg = Package::new(cep("31110700"), cep("01310-100"), (30, 20, 10), 1500).unwrap();
        assert_eq!(
            keys::national_quote(&pkg),
            "national-carrier-quote:31110700:01310100:30x20x10:1500"
        );
        assert_eq!(keys::postal_region(&cep("01310100")), "postal-region:01310100");
        assert_eq!(keys::address(&cep("01310100")), "address:01310100");
    }

    #[tokio::test]
    async fn json_helpers_roundtrip() {
        let cache = InMemoryCache::new();
        set_json(&cache, "k", &vec![1, 2, 3], Duration::from_secs(60)).await;
        let back: Option<Vec<u32>> = get_json(&cache, "k").await;
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn undecodable_entry_is_a_miss() {
        let cache = InMemoryCache::new();
        cache.set("k", "not json", Duration::from_secs(60)).await.unwrap();
        let back: Option<Vec<u32>> = get_json(&cache, "k").await;
        assert!(back.is_none());
    }
}
