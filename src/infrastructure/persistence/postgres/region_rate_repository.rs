//! # PostgreSQL Region Rate Repository
//!
//! PostgreSQL implementation of [`RegionRateRepository`] using sqlx.

use super::{map_write_error, to_i32, to_u32};
use crate::domain::entities::{NewRegionRate, RegionRate};
use crate::domain::value_objects::Region;
use crate::infrastructure::persistence::traits::{
    RegionRateRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const ENTITY: &str = "RegionRate";

const COLUMNS: &str = "id, region, weight, deadline, price, created_at, updated_at";

/// PostgreSQL implementation of [`RegionRateRepository`].
#[derive(Debug, Clone)]
pub struct PostgresRegionRateRepository {
    pool: PgPool,
}

impl PostgresRegionRateRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionRateRepository for PostgresRegionRateRepository {
    async fn create(&self, rate: &NewRegionRate) -> RepositoryResult<RegionRate> {
        let row: RegionRateRow = sqlx::query_as(&format!(
            "INSERT INTO region_rates (region, weight, deadline, price) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(rate.region.as_str())
        .bind(to_i32("weight", rate.weight_g)?)
        .bind(to_i32("deadline", rate.deadline_days)?)
        .bind(rate.price_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(ENTITY, rate.business_key(), e))?;

        row.try_into_rate()
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<RegionRate>> {
        let row: Option<RegionRateRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM region_rates WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(RegionRateRow::try_into_rate).transpose()
    }

    async fn get_all(&self) -> RepositoryResult<Vec<RegionRate>> {
        let rows: Vec<RegionRateRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM region_rates ORDER BY region, weight, deadline"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(RegionRateRow::try_into_rate).collect()
    }

    async fn update(&self, id: i64, rate: &NewRegionRate) -> RepositoryResult<Option<RegionRate>> {
        let row: Option<RegionRateRow> = sqlx::query_as(&format!(
            "UPDATE region_rates SET region = $2, weight = $3, deadline = $4, price = $5, \
             updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(rate.region.as_str())
        .bind(to_i32("weight", rate.weight_g)?)
        .bind(to_i32("deadline", rate.deadline_days)?)
        .bind(rate.price_cents)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(ENTITY, rate.business_key(), e))?;

        row.map(RegionRateRow::try_into_rate).transpose()
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM region_rates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_bracket(&self, region: Region, weight_g: u32) -> RepositoryResult<Vec<RegionRate>> {
        let rows: Vec<RegionRateRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM region_rates \
             WHERE region = $1 AND weight = ( \
                 SELECT MIN(weight) FROM region_rates WHERE region = $1 AND weight >= $2 \
             ) ORDER BY deadline"
        ))
        .bind(region.as_str())
        .bind(to_i32("weight", weight_g)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(RegionRateRow::try_into_rate).collect()
    }
}

/// Row type for region rate queries.
#[derive(Debug, sqlx::FromRow)]
struct RegionRateRow {
    id: i64,
    region: String,
    weight: i32,
    deadline: i32,
    price: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RegionRateRow {
    fn try_into_rate(self) -> RepositoryResult<RegionRate> {
        let region = self
            .region
            .parse::<Region>()
            .map_err(|e| RepositoryError::serialization(e.to_string()))?;

        Ok(RegionRate {
            id: self.id,
            region,
            weight_g: to_u32("weight", self.weight)?,
            deadline_days: to_u32("deadline", self.deadline)?,
            price_cents: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
