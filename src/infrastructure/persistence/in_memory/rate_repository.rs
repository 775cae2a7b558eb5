//! # In-Memory Rate Repositories
//!
//! In-memory implementations of the rate table repositories for testing
//! and local runs.
//!
//! One generic store, [`InMemoryRateRepository`], backs all three tables.
//! Rows live in a `BTreeMap` keyed by id behind a tokio `RwLock`; ids are
//! assigned sequentially from 1.

use crate::domain::entities::rate::select_bracket;
use crate::domain::entities::{
    CourierRate, DealerRate, NewCourierRate, NewDealerRate, NewRegionRate, RegionRate,
};
use crate::domain::value_objects::Region;
use crate::infrastructure::persistence::traits::{
    CourierRateRepository, DealerRateRepository, RegionRateRepository, RepositoryError,
    RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A rate row the in-memory store knows how to create and update.
pub trait StoredRate: Clone + Send + Sync + fmt::Debug + 'static {
    /// Fields supplied on create and update.
    type Input: Send + Sync;

    /// Entity name used in errors.
    const ENTITY: &'static str;

    /// Builds a new row.
    fn from_input(id: i64, input: &Self::Input, now: DateTime<Utc>) -> Self;

    /// Overwrites the row's fields, keeping id and creation time.
    fn apply(&mut self, input: &Self::Input, now: DateTime<Utc>);

    /// Business key of a stored row.
    fn key(&self) -> String;

    /// Business key of an input.
    fn input_key(input: &Self::Input) -> String;

    /// Listing order.
    fn sort_key(&self) -> String;
}

#[derive(Debug)]
struct Table<R> {
    rows: BTreeMap<i64, R>,
    next_id: i64,
}

/// Generic in-memory rate store.
#[derive(Debug, Clone)]
pub struct InMemoryRateRepository<R> {
    storage: Arc<RwLock<Table<R>>>,
}

/// In-memory [`RegionRateRepository`].
pub type InMemoryRegionRateRepository = InMemoryRateRepository<RegionRate>;
/// In-memory [`CourierRateRepository`].
pub type InMemoryCourierRateRepository = InMemoryRateRepository<CourierRate>;
/// In-memory [`DealerRateRepository`].
pub type InMemoryDealerRateRepository = InMemoryRateRepository<DealerRate>;

impl<R: StoredRate> InMemoryRateRepository<R> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.storage.read().await.rows.len()
    }

    /// Returns true if no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn insert(&self, input: &R::Input) -> RepositoryResult<R> {
        let mut table = self.storage.write().await;
        let key = R::input_key(input);
        if table.rows.values().any(|r| r.key() == key) {
            return Err(RepositoryError::duplicate(R::ENTITY, key));
        }

        let id = table.next_id;
        table.next_id += 1;
        let row = R::from_input(id, input, Utc::now());
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn fetch(&self, id: i64) -> Option<R> {
        self.storage.read().await.rows.get(&id).cloned()
    }

    async fn all(&self) -> Vec<R> {
        let table = self.storage.read().await;
        let mut rows: Vec<R> = table.rows.values().cloned().collect();
        rows.sort_by_key(R::sort_key);
        rows
    }

    async fn replace(&self, id: i64, input: &R::Input) -> RepositoryResult<Option<R>> {
        let mut table = self.storage.write().await;
        let key = R::input_key(input);
        if table.rows.iter().any(|(other, r)| *other != id && r.key() == key) {
            return Err(RepositoryError::duplicate(R::ENTITY, key));
        }

        Ok(table.rows.get_mut(&id).map(|row| {
            row.apply(input, Utc::now());
            row.clone()
        }))
    }

    async fn remove(&self, id: i64) -> bool {
        self.storage.write().await.rows.remove(&id).is_some()
    }

    async fn matching(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        let table = self.storage.read().await;
        table.rows.values().filter(|r| predicate(r)).cloned().collect()
    }
}

impl<R: StoredRate> Default for InMemoryRateRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Row mappings
// ============================================================================

impl StoredRate for RegionRate {
    type Input = NewRegionRate;
    const ENTITY: &'static str = "RegionRate";

    fn from_input(id: i64, input: &NewRegionRate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            region: input.region,
            weight_g: input.weight_g,
            deadline_days: input.deadline_days,
            price_cents: input.price_cents,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: &NewRegionRate, now: DateTime<Utc>) {
        self.region = input.region;
        self.weight_g = input.weight_g;
        self.deadline_days = input.deadline_days;
        self.price_cents = input.price_cents;
        self.updated_at = now;
    }

    fn key(&self) -> String {
        format!("{}:{}:{}", self.region, self.weight_g, self.deadline_days)
    }

    fn input_key(input: &NewRegionRate) -> String {
        input.business_key()
    }

    fn sort_key(&self) -> String {
        format!("{}:{:010}:{:05}", self.region, self.weight_g, self.deadline_days)
    }
}

impl StoredRate for CourierRate {
    type Input = NewCourierRate;
    const ENTITY: &'static str = "CourierRate";

    fn from_input(id: i64, input: &NewCourierRate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            state: input.state_norm(),
            city: input.city.trim().to_string(),
            city_norm: input.city_norm(),
            deadline_days: input.deadline_days,
            price_cents: input.price_cents,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: &NewCourierRate, now: DateTime<Utc>) {
        self.state = input.state_norm();
        self.city = input.city.trim().to_string();
        self.city_norm = input.city_norm();
        self.deadline_days = input.deadline_days;
        self.price_cents = input.price_cents;
        self.updated_at = now;
    }

    fn key(&self) -> String {
        format!("{}:{}", self.state, self.city_norm)
    }

    fn input_key(input: &NewCourierRate) -> String {
        input.business_key()
    }

    fn sort_key(&self) -> String {
        self.key()
    }
}

impl StoredRate for DealerRate {
    type Input = NewDealerRate;
    const ENTITY: &'static str = "DealerRate";

    fn from_input(id: i64, input: &NewDealerRate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            dealer: input.dealer_norm(),
            weight_g: input.weight_g,
            deadline_days: input.deadline_days,
            price_cents: input.price_cents,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, input: &NewDealerRate, now: DateTime<Utc>) {
        self.dealer = input.dealer_norm();
        self.weight_g = input.weight_g;
        self.deadline_days = input.deadline_days;
        self.price_cents = input.price_cents;
        self.updated_at = now;
    }

    fn key(&self) -> String {
        format!("{}:{}:{}", self.dealer, self.weight_g, self.deadline_days)
    }

    fn input_key(input: &NewDealerRate) -> String {
        input.business_key()
    }

    fn sort_key(&self) -> String {
        format!("{}:{:010}:{:05}", self.dealer, self.weight_g, self.deadline_days)
    }
}

// ============================================================================
// Repository implementations
// ============================================================================

#[async_trait]
impl RegionRateRepository for InMemoryRateRepository<RegionRate> {
    async fn create(&self, rate: &NewRegionRate) -> RepositoryResult<RegionRate> {
        self.insert(rate).await
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<RegionRate>> {
        Ok(self.fetch(id).await)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<RegionRate>> {
        Ok(self.all().await)
    }

    async fn update(&self, id: i64, rate: &NewRegionRate) -> RepositoryResult<Option<RegionRate>> {
        self.replace(id, rate).await
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.remove(id).await)
    }

    async fn find_bracket(&self, region: Region, weight_g: u32) -> RepositoryResult<Vec<RegionRate>> {
        let rows = self.matching(|r| r.region == region).await;
        Ok(select_bracket(&rows, weight_g))
    }
}

#[async_trait]
impl CourierRateRepository for InMemoryRateRepository<CourierRate> {
    async fn create(&self, rate: &NewCourierRate) -> RepositoryResult<CourierRate> {
        self.insert(rate).await
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<CourierRate>> {
        Ok(self.fetch(id).await)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<CourierRate>> {
        Ok(self.all().await)
    }

    async fn update(&self, id: i64, rate: &NewCourierRate) -> RepositoryResult<Option<CourierRate>> {
        self.replace(id, rate).await
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.remove(id).await)
    }

    async fn find_by_city(
        &self,
        state: &str,
        city_norm: &str,
    ) -> RepositoryResult<Option<CourierRate>> {
        let rows = self
            .matching(|r| r.state == state && r.city_norm == city_norm)
            .await;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl DealerRateRepository for InMemoryRateRepository<DealerRate> {
    async fn create(&self, rate: &NewDealerRate) -> RepositoryResult<DealerRate> {
        self.insert(rate).await
    }

    async fn get(&self, id: i64) -> RepositoryResult<Option<DealerRate>> {
        Ok(self.fetch(id).await)
    }

    async fn get_all(&self) -> RepositoryResult<Vec<DealerRate>> {
        Ok(self.all().await)
    }

    async fn update(&self, id: i64, rate: &NewDealerRate) -> RepositoryResult<Option<DealerRate>> {
        self.replace(id, rate).await
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.remove(id).await)
    }

    async fn find_bracket(&self, dealer: &str, weight_g: u32) -> RepositoryResult<Vec<DealerRate>> {
        let rows = self.matching(|r| r.dealer == dealer).await;
        Ok(select_bracket(&rows, weight_g))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn region_rate(region: Region, weight_g: u32, deadline_days: u32, price_cents: i64) -> NewRegionRate {
        NewRegionRate {
            region,
            weight_g,
            deadline_days,
            price_cents,
        }
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryRegionRateRepository::new();
        assert!(repo.is_empty().await);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryRegionRateRepository::new();
        let a = repo.create(&region_rate(Region::South, 1000, 3, 1500)).await.unwrap();
        let b = repo.create(&region_rate(Region::South, 1000, 5, 1200)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.get(2).await.unwrap().unwrap().price_cents, 1200);
    }

    #[tokio::test]
    async fn duplicate_key_rejected() {
        let repo = InMemoryRegionRateRepository::new();
        repo.create(&region_rate(Region::North, 1000, 3, 1500)).await.unwrap();
        let err = repo
            .create(&region_rate(Region::North, 1000, 3, 999))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let repo = InMemoryRegionRateRepository::new();
        let row = repo.create(&region_rate(Region::North, 1000, 3, 1500)).await.unwrap();

        let updated = repo
            .update(row.id, &region_rate(Region::North, 2000, 3, 1700))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.weight_g, 2000);
        assert_eq!(updated.created_at, row.created_at);

        assert!(repo.update(99, &region_rate(Region::North, 1, 1, 1)).await.unwrap().is_none());
        assert!(repo.delete(row.id).await.unwrap());
        assert!(!repo.delete(row.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_into_existing_key_rejected() {
        let repo = InMemoryRegionRateRepository::new();
        repo.create(&region_rate(Region::North, 1000, 3, 1500)).await.unwrap();
        let other = repo.create(&region_rate(Region::North, 2000, 3, 1500)).await.unwrap();
        let err = repo
            .update(other.id, &region_rate(Region::North, 1000, 3, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn find_bracket_filters_region() {
        let repo = InMemoryRegionRateRepository::new();
        repo.create(&region_rate(Region::South, 1000, 4, 1500)).await.unwrap();
        repo.create(&region_rate(Region::South, 1000, 2, 2500)).await.unwrap();
        repo.create(&region_rate(Region::South, 3000, 1, 3500)).await.unwrap();
        repo.create(&region_rate(Region::North, 1000, 1, 100)).await.unwrap();

        let rows = repo.find_bracket(Region::South, 800).await.unwrap();
        let deadlines: Vec<u32> = rows.iter().map(|r| r.deadline_days).collect();
        assert_eq!(deadlines, vec![2, 4]);

        assert!(repo.find_bracket(Region::South, 5000).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn courier_rates_normalize_city() {
        let repo = InMemoryCourierRateRepository::new();
        let row = repo
            .create(&NewCourierRate {
                state: "MG".to_string(),
                city: " Belo  Horizonte ".to_string(),
                deadline_days: 1,
                price_cents: 1500,
            })
            .await
            .unwrap();
        assert_eq!(row.state, "mg");
        assert_eq!(row.city_norm, "belo-horizonte");

        let found = repo.find_by_city("mg", "belo-horizonte").await.unwrap();
        assert_eq!(found.map(|r| r.id), Some(row.id));
        assert!(repo.find_by_city("sp", "belo-horizonte").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dealer_rates_lowercase_dealer() {
        let repo = InMemoryDealerRateRepository::new();
        repo.create(&NewDealerRate {
            dealer: "Aldo".to_string(),
            weight_g: 5000,
            deadline_days: 3,
            price_cents: 2000,
        })
        .await
        .unwrap();

        let rows = repo.find_bracket("aldo", 4999).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].dealer, "aldo");
    }
}
