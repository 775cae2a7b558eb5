//! # Estimate Freight Use Case
//!
//! End-to-end freight estimation for both channels.
//!
//! Validation happens before any provider call. Provider failures never
//! surface here; an order nobody can quote yields an empty offer list.

use crate::application::error::ApplicationResult;
use crate::application::services::{
    Channel, FreightAggregationEngine, MarketplaceResponse, ResultFormatter, StorefrontOffer,
};
use crate::domain::entities::{Package, ProductLineItem, Quote};
use crate::domain::services::{DealerDirectory, LegCombiner, LegPlan, LegPlanner};
use crate::domain::value_objects::PostalCode;
use crate::infrastructure::catalog::{ProductCatalog, ProductRef};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A package the caller has already packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedShipment {
    /// Origin override; the warehouse when absent.
    pub origin: Option<PostalCode>,
    /// Destination.
    pub destination: PostalCode,
    /// `(length, width, height)` in centimetres.
    pub dimensions_cm: (u32, u32, u32),
    /// Weight in grams.
    pub weight_g: u32,
    /// Dealer supplying the package, if any.
    pub dealer: Option<String>,
}

/// Estimates freight for storefront and marketplace requests.
#[derive(Debug, Clone)]
pub struct EstimateFreightUseCase {
    warehouse: PostalCode,
    planner: LegPlanner,
    dealers: Arc<DealerDirectory>,
    engine: FreightAggregationEngine,
    catalog: Arc<dyn ProductCatalog>,
}

impl EstimateFreightUseCase {
    /// Creates the use case.
    #[must_use]
    pub fn new(
        warehouse: PostalCode,
        planner: LegPlanner,
        dealers: Arc<DealerDirectory>,
        engine: FreightAggregationEngine,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            warehouse,
            planner,
            dealers,
            engine,
            catalog,
        }
    }

    /// Storefront estimate for a list of products, planning dealer legs.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if any item is invalid.
    #[instrument(skip(self, items), fields(items = items.len(), destination = %destination))]
    pub async fn estimate_products(
        &self,
        items: &[ProductLineItem],
        destination: PostalCode,
    ) -> ApplicationResult<Vec<StorefrontOffer>> {
        let plan = self.planner.plan(items, destination)?;
        let offers = self.quote(&plan, Channel::Storefront).await;
        let surcharge = self
            .dealers
            .max_deadline_surcharge(items.iter().map(|i| i.dealer.as_str()));
        Ok(ResultFormatter::storefront(&offers, surcharge))
    }

    /// Storefront estimate for a pre-packed package, shipped directly.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if a dimension or the weight is
    /// zero.
    #[instrument(skip(self, shipment), fields(destination = %shipment.destination))]
    pub async fn estimate_package(&self, shipment: PackedShipment) -> ApplicationResult<Vec<StorefrontOffer>> {
        let origin = shipment.origin.unwrap_or_else(|| self.warehouse.clone());
        let mut package = Package::new(origin, shipment.destination, shipment.dimensions_cm, shipment.weight_g)?;
        if let Some(dealer) = shipment.dealer.filter(|d| !d.trim().is_empty()) {
            package = package.with_dealer(dealer.trim().to_lowercase());
        }

        let plan = LegPlan::direct(package);
        let offers = self.quote(&plan, Channel::Storefront).await;
        let surcharge = self.dealers.max_deadline_surcharge(plan.customer_package().dealer());
        Ok(ResultFormatter::storefront(&offers, surcharge))
    }

    /// Marketplace estimate for catalog product references.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::BadRequest` for unknown products,
    /// `ApplicationError::BadGateway` if the catalog fails, and
    /// `ApplicationError::Domain` if a resolved item is invalid.
    #[instrument(skip(self, refs), fields(items = refs.len(), destination = %destination))]
    pub async fn estimate_marketplace(
        &self,
        refs: &[ProductRef],
        destination: PostalCode,
    ) -> ApplicationResult<MarketplaceResponse> {
        let requested_at = Utc::now();
        let items = self.catalog.resolve(refs).await?;
        debug!(resolved = items.len(), "catalog products resolved");

        let plan = self.planner.plan(&items, destination)?;
        let offers = self.quote(&plan, Channel::Marketplace).await;
        Ok(ResultFormatter::marketplace(
            &offers,
            plan.customer_package(),
            requested_at,
        ))
    }

    async fn quote(&self, plan: &LegPlan, channel: Channel) -> Vec<Quote> {
        let legs = self.engine.collect(plan).await;
        let offers = LegCombiner::combine(&legs.customer, &legs.dealer, channel.includes_courier());
        info!(
            %channel,
            dealer_legs = plan.dealer_packages().len(),
            offers = offers.len(),
            "freight estimated"
        );
        offers
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::error::ApplicationError;
    use crate::application::services::QuoteProviders;
    use crate::domain::services::{DealerProfile, ShipmentBuilder};
    use crate::domain::value_objects::{CarrierKind, Price};
    use crate::infrastructure::catalog::{CatalogError, CatalogResult};
    use crate::infrastructure::providers::{ProviderResult, QuoteProvider};
    use async_trait::async_trait;
    use std::collections::HashMap;

    const WAREHOUSE: &str = "31110700";
    const CUSTOMER: &str = "01310100";
    const DEALER: &str = "87050000";

    fn cep(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    /// Returns quotes keyed by package origin.
    #[derive(Debug, Default)]
    struct ByOrigin {
        kind: Option<CarrierKind>,
        quotes: HashMap<String, Vec<Quote>>,
    }

    impl ByOrigin {
        fn new(kind: CarrierKind) -> Self {
            Self {
                kind: Some(kind),
                quotes: HashMap::new(),
            }
        }

        fn with(mut self, origin: &str, quotes: Vec<Quote>) -> Self {
            self.quotes.insert(origin.to_string(), quotes);
            self
        }
    }

    #[async_trait]
    impl QuoteProvider for ByOrigin {
        fn kind(&self) -> CarrierKind {
            self.kind.unwrap_or(CarrierKind::NationalCarrier)
        }

        async fn try_quote(&self, package: &Package) -> ProviderResult<Vec<Quote>> {
            Ok(self.quotes.get(package.origin().as_str()).cloned().unwrap_or_default())
        }
    }

    #[derive(Debug)]
    struct Catalog(Vec<ProductLineItem>);

    #[async_trait]
    impl ProductCatalog for Catalog {
        async fn resolve(&self, refs: &[ProductRef]) -> CatalogResult<Vec<ProductLineItem>> {
            if refs.len() != self.0.len() {
                return Err(CatalogError::NotFound {
                    requested: refs.len(),
                    found: self.0.len(),
                });
            }
            Ok(self.0.clone())
        }
    }

    fn pac(cents: i64, days: u32) -> Quote {
        Quote::new(CarrierKind::NationalCarrier, "Correios", Price::from_cents(cents).unwrap(), days)
            .with_service("04510", "PAC")
    }

    fn courier() -> Quote {
        Quote::new(CarrierKind::LocalCourier, "Motoboy", Price::from_cents(1500).unwrap(), 1)
    }

    fn item(id: &str, dealer: &str) -> ProductLineItem {
        ProductLineItem::new(id, (20, 10, 5), 800, Price::from_cents(10_000).unwrap()).with_dealer(dealer, "")
    }

    fn use_case(catalog_items: Vec<ProductLineItem>) -> EstimateFreightUseCase {
        let dealers = Arc::new(DealerDirectory::new([
            DealerProfile::new("Aldo", "", cep(DEALER))
                .with_shipment_delay(2)
                .with_deadline_surcharge(3),
        ]));
        let warehouse = cep(WAREHOUSE);
        let planner = LegPlanner::new(ShipmentBuilder::new(warehouse.clone(), dealers.clone()), dealers.clone());
        let engine = FreightAggregationEngine::new(QuoteProviders {
            national: Arc::new(
                ByOrigin::new(CarrierKind::NationalCarrier)
                    .with(WAREHOUSE, vec![pac(2000, 6)])
                    .with(DEALER, vec![pac(1000, 4)]),
            ),
            regional: Arc::new(ByOrigin::new(CarrierKind::RegionalTable)),
            courier: Arc::new(ByOrigin::new(CarrierKind::LocalCourier).with(WAREHOUSE, vec![courier()])),
            dealer_table: None,
        });
        EstimateFreightUseCase::new(warehouse, planner, dealers, engine, Arc::new(Catalog(catalog_items)))
    }

    #[tokio::test]
    async fn multi_leg_storefront_offers_sum_both_legs() {
        let offers = use_case(Vec::new())
            .estimate_products(&[item("p1", "aldo")], cep(CUSTOMER))
            .await
            .unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].service_code, "04510");
        assert_eq!(offers[0].price, rust_decimal::Decimal::new(3000, 2));
        // 6 + 4 days plus the dealer's storefront surcharge
        assert_eq!(offers[0].deadline, 13);
    }

    #[tokio::test]
    async fn mixed_orders_keep_the_dealer_surcharge() {
        let offers = use_case(Vec::new())
            .estimate_products(&[item("p1", "aldo"), item("p2", "")], cep(CUSTOMER))
            .await
            .unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].deadline, 13);
    }

    #[tokio::test]
    async fn packed_package_from_flagged_dealer_gains_surcharge() {
        let offers = use_case(Vec::new())
            .estimate_package(PackedShipment {
                origin: None,
                destination: cep(CUSTOMER),
                dimensions_cm: (30, 20, 10),
                weight_g: 1500,
                dealer: Some("Aldo".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(offers[0].deadline, 9);
    }

    #[tokio::test]
    async fn direct_storefront_offers_include_courier() {
        let offers = use_case(Vec::new())
            .estimate_products(&[item("p1", "")], cep(CUSTOMER))
            .await
            .unwrap();

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[1].carrier, "Motoboy");
    }

    #[tokio::test]
    async fn invalid_items_fail_before_quoting() {
        let bad = ProductLineItem::new("p1", (0, 10, 5), 800, Price::from_cents(10_000).unwrap());
        let result = use_case(Vec::new()).estimate_products(&[bad], cep(CUSTOMER)).await;
        assert!(matches!(result, Err(ApplicationError::Domain(_))));
    }

    #[tokio::test]
    async fn packed_package_defaults_to_warehouse_origin() {
        let offers = use_case(Vec::new())
            .estimate_package(PackedShipment {
                origin: None,
                destination: cep(CUSTOMER),
                dimensions_cm: (30, 20, 10),
                weight_g: 1500,
                dealer: None,
            })
            .await
            .unwrap();

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].deadline, 6);
    }

    #[tokio::test]
    async fn marketplace_excludes_courier_and_adds_delay() {
        let refs = [ProductRef {
            id: "p1".to_string(),
            quantity: 1,
        }];
        let response = use_case(vec![item("p1", "aldo")])
            .estimate_marketplace(&refs, cep(CUSTOMER))
            .await
            .unwrap();

        assert_eq!(response.estimates.len(), 1);
        // 6 + 4 days plus the two-day shipment delay
        assert_eq!(response.estimates[0].deadline, 12);
    }

    #[tokio::test]
    async fn unknown_marketplace_products_are_bad_requests() {
        let refs = [ProductRef {
            id: "missing".to_string(),
            quantity: 1,
        }];
        let result = use_case(Vec::new()).estimate_marketplace(&refs, cep(CUSTOMER)).await;
        assert!(matches!(result, Err(ApplicationError::BadRequest(_))));
    }
}
