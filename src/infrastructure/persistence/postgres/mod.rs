//! # PostgreSQL Repositories
//!
//! PostgreSQL implementations of the rate repositories using sqlx.
//!
//! Schema lives in `migrations/` and is applied with [`run_migrations`].

pub mod courier_rate_repository;
pub mod dealer_rate_repository;
pub mod region_rate_repository;

pub use courier_rate_repository::PostgresCourierRateRepository;
pub use dealer_rate_repository::PostgresDealerRateRepository;
pub use region_rate_repository::PostgresRegionRateRepository;

use crate::infrastructure::persistence::traits::{RepositoryError, RepositoryResult};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Pool settings.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Database URL.
    pub url: String,
    /// Maximum pool size.
    pub max_connections: u32,
    /// Minimum pool size.
    pub min_connections: u32,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Idle timeout.
    pub idle_timeout: Duration,
}

/// Opens a connection pool.
///
/// # Errors
///
/// Returns `RepositoryError::Connection` if the database is unreachable.
pub async fn connect(settings: &PoolSettings) -> RepositoryResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.connect_timeout)
        .idle_timeout(settings.idle_timeout)
        .connect(&settings.url)
        .await
        .map_err(|e| RepositoryError::connection(e.to_string()))
}

/// Applies the embedded migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Query` if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))
}

/// Maps a sqlx error, turning unique violations into duplicates.
pub(crate) fn map_write_error(entity_type: &'static str, key: String, error: sqlx::Error) -> RepositoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::duplicate(entity_type, key)
        }
        _ => RepositoryError::query(error.to_string()),
    }
}

/// Converts a stored integer column to `u32`.
pub(crate) fn to_u32(column: &'static str, value: i32) -> RepositoryResult<u32> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::serialization(format!("negative {column}: {value}")))
}

/// Converts a `u32` to an integer column value.
pub(crate) fn to_i32(column: &'static str, value: u32) -> RepositoryResult<i32> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::serialization(format!("{column} out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversions() {
        assert_eq!(to_u32("weight", 10).ok(), Some(10));
        assert!(to_u32("weight", -1).is_err());
        assert!(to_i32("weight", u32::MAX).is_err());
    }
}
