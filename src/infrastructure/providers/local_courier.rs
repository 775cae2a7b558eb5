//! # Local Courier Provider
//!
//! Same-day courier quotes for cities of the served state.
//!
//! The courier always departs from the warehouse, so its quote set reports
//! the warehouse as origin whatever package it is asked about.

use crate::domain::entities::rate::normalize_city;
use crate::domain::entities::{Package, Quote};
use crate::domain::value_objects::{CarrierKind, PostalCode, Price};
use crate::infrastructure::geo::GeoResolver;
use crate::infrastructure::persistence::CourierRateRepository;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::QuoteProvider;
use async_trait::async_trait;
use std::sync::Arc;

/// Carrier label on courier quotes.
pub const CARRIER_LABEL: &str = "Motoboy";

/// Quote provider over the courier rate table.
#[derive(Debug, Clone)]
pub struct LocalCourierProvider {
    geo: GeoResolver,
    rates: Arc<dyn CourierRateRepository>,
    warehouse: PostalCode,
    state: String,
}

impl LocalCourierProvider {
    /// Creates a provider serving `state`.
    #[must_use]
    pub fn new(
        geo: GeoResolver,
        rates: Arc<dyn CourierRateRepository>,
        warehouse: PostalCode,
        state: impl Into<String>,
    ) -> Self {
        Self {
            geo,
            rates,
            warehouse,
            state: state.into().trim().to_lowercase(),
        }
    }
}

#[async_trait]
impl QuoteProvider for LocalCourierProvider {
    fn kind(&self) -> CarrierKind {
        CarrierKind::LocalCourier
    }

    fn quoted_origin<'a>(&'a self, _package: &'a Package) -> &'a PostalCode {
        &self.warehouse
    }

    async fn try_quote(&self, package: &Package) -> ProviderResult<Vec<Quote>> {
        let address = self.geo.address(package.destination()).await?;
        let state = address.state.trim().to_lowercase();
        if state != self.state {
            return Err(ProviderError::not_served(format!("state {state}")));
        }

        let city = normalize_city(&address.city);
        let rate = self
            .rates
            .find_by_city(&state, &city)
            .await?
            .ok_or_else(|| ProviderError::no_rate(format!("city {state}:{city}")))?;
        let price = Price::from_cents(rate.price_cents)
            .map_err(|e| ProviderError::protocol(e.to_string()))?;

        Ok(vec![Quote::new(self.kind(), CARRIER_LABEL, price, rate.deadline_days)])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::NewCourierRate;
    use crate::infrastructure::geo::tests::{StaticAddressLookup, resolver};
    use crate::infrastructure::persistence::in_memory::InMemoryCourierRateRepository;

    async fn provider() -> LocalCourierProvider {
        let repo = InMemoryCourierRateRepository::new();
        repo.create(&NewCourierRate {
            state: "MG".to_string(),
            city: "Belo Horizonte".to_string(),
            deadline_days: 1,
            price_cents: 1500,
        })
        .await
        .unwrap();
        let lookup = Arc::new(StaticAddressLookup::with(&[
            ("30130010", "Belo Horizonte", "MG"),
            ("32010000", "Contagem", "MG"),
            ("01310100", "São Paulo", "SP"),
        ]));
        LocalCourierProvider::new(
            resolver(lookup),
            Arc::new(repo),
            PostalCode::parse("31110700").unwrap(),
            "mg",
        )
    }

    fn package(origin: &str, dest: &str) -> Package {
        Package::new(
            PostalCode::parse(origin).unwrap(),
            PostalCode::parse(dest).unwrap(),
            (30, 20, 10),
            1500,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn quotes_served_city() {
        let set = provider().await.quote(&package("31110700", "30130010")).await;
        assert!(set.is_success());
        assert_eq!(set.quotes().len(), 1);
        assert_eq!(set.quotes()[0].carrier(), CARRIER_LABEL);
        assert_eq!(set.quotes()[0].price().to_string(), "15.00");
    }

    #[tokio::test]
    async fn reports_warehouse_as_origin() {
        let set = provider().await.quote(&package("87050000", "30130010")).await;
        assert_eq!(set.origin().as_str(), "31110700");
    }

    #[tokio::test]
    async fn city_without_rate_fails() {
        let set = provider().await.quote(&package("31110700", "32010000")).await;
        assert!(!set.is_success());
    }

    #[tokio::test]
    async fn other_state_fails() {
        let set = provider().await.quote(&package("31110700", "01310100")).await;
        assert!(!set.is_success());
    }
}
