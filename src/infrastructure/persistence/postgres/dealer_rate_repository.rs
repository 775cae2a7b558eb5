//! # PostgreSQL Dealer Rate Repository
//!
//! PostgreSQL implementation of [`DealerRateRepository`] using sqlx.

use super::{map_write_error, to_i32, to_u32};
use crate::domain::entities::{DealerRate, NewDealerRate};
use crate::infrastructure::persistence::traits::{
    DealerRateRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const ENTITY: &str = "DealerRate";

const COLUMNS: &str = "id, dealer, weight, deadline, price, created_at, updated_at";

/// PostgreSQL implementation of [`DealerRateRepository`].
#[derive(Debug, Clone)]
pub struct PostgresDealerRateRepository {
    pool: PgPool,
}

impl PostgresDealerRateRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DealerRateRepository for PostgresDealerRateRepository {
    async fn create(&self, rate: &NewDealerRate) -> RepositoryResult<DealerRate> {
        let row: DealerRateRow = sqlx::query_as(&format!(
            "INSERT INTO dealer_rates (dealer, weight, deadline, price) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        ))
        .bind(rate.dealer_norm())
        .bind(to_i32("weight", rate.weight_g)?)
        .bind(to_i32("deadline", rate.deadline_days)?)
        .bind(rate.price_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(ENTITY, rate.business_key(), e))?;

        row.try_into_rate()
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<DealerRate>> {
        let row: Option<DealerRateRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM dealer_rates WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(DealerRateRow::try_into_rate).transpose()
    }

    async fn get_all(&self) -> RepositoryResult<Vec<DealerRate>> {
        let rows: Vec<DealerRateRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM dealer_rates ORDER BY dealer, weight, deadline"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(DealerRateRow::try_into_rate).collect()
    }

    async fn update(&self, id: i64, rate: &NewDealerRate) -> RepositoryResult<Option<DealerRate>> {
        let row: Option<DealerRateRow> = sqlx::query_as(&format!(
            "UPDATE dealer_rates SET dealer = $2, weight = $3, deadline = $4, price = $5, \
             updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(rate.dealer_norm())
        .bind(to_i32("weight", rate.weight_g)?)
        .bind(to_i32("deadline", rate.deadline_days)?)
        .bind(rate.price_cents)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(ENTITY, rate.business_key(), e))?;

        row.map(DealerRateRow::try_into_rate).transpose()
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM dealer_rates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_bracket(&self, dealer: &str, weight_g: u32) -> RepositoryResult<Vec<DealerRate>> {
        let rows: Vec<DealerRateRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM dealer_rates \
             WHERE dealer = $1 AND weight = ( \
                 SELECT MIN(weight) FROM dealer_rates WHERE dealer = $1 AND weight >= $2 \
             ) ORDER BY deadline"
        ))
        .bind(dealer)
        .bind(to_i32("weight", weight_g)?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(DealerRateRow::try_into_rate).collect()
    }
}

/// Row type for dealer rate queries.
#[derive(Debug, sqlx::FromRow)]
struct DealerRateRow {
    id: i64,
    dealer: String,
    weight: i32,
    deadline: i32,
    price: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DealerRateRow {
    fn try_into_rate(self) -> RepositoryResult<DealerRate> {
        Ok(DealerRate {
            id: self.id,
            dealer: self.dealer,
            weight_g: to_u32("weight", self.weight)?,
            deadline_days: to_u32("deadline", self.deadline)?,
            price_cents: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
