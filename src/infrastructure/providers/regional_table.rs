//! # Regional Table Provider
//!
//! Fixed-price quotes by destination region and weight bracket.

use crate::domain::entities::{Package, Quote};
use crate::domain::value_objects::CarrierKind;
use crate::infrastructure::geo::GeoResolver;
use crate::infrastructure::persistence::RegionRateRepository;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::{QuoteProvider, table_quotes};
use async_trait::async_trait;
use std::sync::Arc;

/// Quote provider over the regional rate table.
#[derive(Debug, Clone)]
pub struct RegionalTableProvider {
    geo: GeoResolver,
    rates: Arc<dyn RegionRateRepository>,
}

impl RegionalTableProvider {
    /// Creates a provider.
    #[must_use]
    pub fn new(geo: GeoResolver, rates: Arc<dyn RegionRateRepository>) -> Self {
        Self { geo, rates }
    }
}

#[async_trait]
impl QuoteProvider for RegionalTableProvider {
    fn kind(&self) -> CarrierKind {
        CarrierKind::RegionalTable
    }

    async fn try_quote(&self, package: &Package) -> ProviderResult<Vec<Quote>> {
        let region = self.geo.region(package.destination()).await?;
        let rows = self.rates.find_bracket(region, package.weight_g()).await?;
        if rows.is_empty() {
            return Err(ProviderError::no_rate(format!(
                "region {region} at {}g",
                package.weight_g()
            )));
        }
        Ok(table_quotes(self.kind(), &rows))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::NewRegionRate;
    use crate::domain::value_objects::{PostalCode, Region};
    use crate::infrastructure::geo::tests::{StaticAddressLookup, resolver};
    use crate::infrastructure::persistence::in_memory::InMemoryRegionRateRepository;

    async fn provider() -> RegionalTableProvider {
        let repo = InMemoryRegionRateRepository::new();
        for (region, weight_g, deadline_days, price_cents) in [
            (Region::Southeast, 1000, 5, 1500),
            (Region::Southeast, 5000, 7, 2200),
            (Region::Southeast, 5000, 3, 3100),
            (Region::South, 5000, 4, 2700),
        ] {
            repo.create(&NewRegionRate {
                region,
                weight_g,
                deadline_days,
                price_cents,
            })
            .await
            .unwrap();
        }
        let lookup = Arc::new(StaticAddressLookup::with(&[
            ("01310100", "São Paulo", "SP"),
            ("69005010", "Manaus", "AM"),
        ]));
        RegionalTableProvider::new(resolver(lookup), Arc::new(repo))
    }

    fn package(dest: &str, weight_g: u32) -> Package {
        Package::new(
            PostalCode::parse("31110700").unwrap(),
            PostalCode::parse(dest).unwrap(),
            (30, 20, 10),
            weight_g,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn quotes_smallest_fitting_bracket_by_deadline() {
        let set = provider().await.quote(&package("01310100", 1200)).await;
        assert!(set.is_success());
        let quotes = set.quotes();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].carrier(), "Transportadora 1");
        assert_eq!(quotes[0].deadline_days(), 3);
        assert_eq!(quotes[1].carrier(), "Transportadora 2");
        assert_eq!(quotes[1].price().to_string(), "22.00");
    }

    #[tokio::test]
    async fn no_bracket_fails() {
        let set = provider().await.quote(&package("01310100", 6000)).await;
        assert!(!set.is_success());
    }

    #[tokio::test]
    async fn region_without_rates_fails() {
        let set = provider().await.quote(&package("69005010", 500)).await;
        assert!(!set.is_success());
    }

    #[tokio::test]
    async fn unresolvable_destination_fails() {
        let set = provider().await.quote(&package("99999999", 500)).await;
        assert!(!set.is_success());
    }
}
