//! # PostgreSQL Courier Rate Repository
//!
//! PostgreSQL implementation of [`CourierRateRepository`] using sqlx.

use super::{map_write_error, to_i32, to_u32};
use crate::domain::entities::{CourierRate, NewCourierRate};
use crate::infrastructure::persistence::traits::{
    CourierRateRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

const ENTITY: &str = "CourierRate";

const COLUMNS: &str = "id, state, city, city_norm, deadline, price, created_at, updated_at";

/// PostgreSQL implementation of [`CourierRateRepository`].
#[derive(Debug, Clone)]
pub struct PostgresCourierRateRepository {
    pool: PgPool,
}

impl PostgresCourierRateRepository {
    /// Creates a new repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourierRateRepository for PostgresCourierRateRepository {
    async fn create(&self, rate: &NewCourierRate) -> RepositoryResult<CourierRate> {
        let row: CourierRateRow = sqlx::query_as(&format!(
            "INSERT INTO courier_rates (state, city, city_norm, deadline, price) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(rate.state_norm())
        .bind(rate.city.trim())
        .bind(rate.city_norm())
        .bind(to_i32("deadline", rate.deadline_days)?)
        .bind(rate.price_cents)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(ENTITY, rate.business_key(), e))?;

        row.try_into_rate()
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<CourierRate>> {
        let row: Option<CourierRateRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM courier_rates WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(CourierRateRow::try_into_rate).transpose()
    }

    async fn get_all(&self) -> RepositoryResult<Vec<CourierRate>> {
        let rows: Vec<CourierRateRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM courier_rates ORDER BY state, city_norm"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        rows.into_iter().map(CourierRateRow::try_into_rate).collect()
    }

    async fn update(&self, id: i64, rate: &NewCourierRate) -> RepositoryResult<Option<CourierRate>> {
        let row: Option<CourierRateRow> = sqlx::query_as(&format!(
            "UPDATE courier_rates SET state = $2, city = $3, city_norm = $4, deadline = $5, \
             price = $6, updated_at = now() WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(rate.state_norm())
        .bind(rate.city.trim())
        .bind(rate.city_norm())
        .bind(to_i32("deadline", rate.deadline_days)?)
        .bind(rate.price_cents)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(ENTITY, rate.business_key(), e))?;

        row.map(CourierRateRow::try_into_rate).transpose()
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM courier_rates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_city(
        &self,
        state: &str,
        city_norm: &str,
    ) -> RepositoryResult<Option<CourierRate>> {
        let row: Option<CourierRateRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM courier_rates WHERE state = $1 AND city_norm = $2"
        ))
        .bind(state)
        .bind(city_norm)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::query(e.to_string()))?;

        row.map(CourierRateRow::try_into_rate).transpose()
    }
}

/// Row type for courier rate queries.
#[derive(Debug, sqlx::FromRow)]
struct CourierRateRow {
    id: i64,
    state: String,
    city: String,
    city_norm: String,
    deadline: i32,
    price: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CourierRateRow {
    fn try_into_rate(self) -> RepositoryResult<CourierRate> {
        Ok(CourierRate {
            id: self.id,
            state: self.state,
            city: self.city,
            city_norm: self.city_norm,
            deadline_days: to_u32("deadline", self.deadline)?,
            price_cents: self.price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
