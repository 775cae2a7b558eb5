//! # Freight Aggregation Engine
//!
//! Fans provider calls out over every leg of a plan and joins the results.
//!
//! Each provider call runs as its own tokio task; the engine waits for all
//! of them before classifying quote sets by origin and summing the dealer
//! legs. A task that panics is logged and counted as a failed quote set.

use crate::domain::entities::{Package, Quote, QuoteSet};
use crate::domain::services::{CustomerLegQuotes, DealerLegQuotes, LegPlan};
use crate::domain::value_objects::{CarrierKind, PostalCode};
use crate::infrastructure::providers::QuoteProvider;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error};

/// The quote sources used per leg.
#[derive(Debug, Clone)]
pub struct QuoteProviders {
    /// National carrier, quoted on every leg.
    pub national: Arc<dyn QuoteProvider>,
    /// Regional table, customer leg only.
    pub regional: Arc<dyn QuoteProvider>,
    /// Local courier, customer leg only.
    pub courier: Arc<dyn QuoteProvider>,
    /// Dealer table, dealer legs only, when configured.
    pub dealer_table: Option<Arc<dyn QuoteProvider>>,
}

/// Joined quotes of both legs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegQuotes {
    /// Warehouse → customer leg.
    pub customer: CustomerLegQuotes,
    /// Dealer → warehouse legs, summed.
    pub dealer: DealerLegQuotes,
}

/// Collects quotes for a plan.
#[derive(Debug, Clone)]
pub struct FreightAggregationEngine {
    providers: QuoteProviders,
}

impl FreightAggregationEngine {
    /// Creates an engine.
    #[must_use]
    pub fn new(providers: QuoteProviders) -> Self {
        Self { providers }
    }

    /// Quotes every leg of `plan` concurrently and joins the results.
    pub async fn collect(&self, plan: &LegPlan) -> LegQuotes {
        let customer_package = plan.customer_package();
        let mut calls: Vec<(Arc<dyn QuoteProvider>, Package)> = vec![
            (self.providers.national.clone(), customer_package.clone()),
            (self.providers.courier.clone(), customer_package.clone()),
            (self.providers.regional.clone(), customer_package.clone()),
        ];
        for package in plan.dealer_packages() {
            calls.push((self.providers.national.clone(), package.clone()));
            if let Some(table) = &self.providers.dealer_table {
                calls.push((table.clone(), package.clone()));
            }
        }

        let sets = dispatch(calls).await;
        join(customer_package.origin(), plan.dealer_packages().len(), &sets)
    }
}

/// Runs every call as a task and waits for all of them.
///
/// Results come back in call order.
async fn dispatch(calls: Vec<(Arc<dyn QuoteProvider>, Package)>) -> Vec<QuoteSet> {
    let mut labels = Vec::with_capacity(calls.len());
    let mut handles = Vec::with_capacity(calls.len());
    for (provider, package) in calls {
        labels.push((provider.kind(), package.origin().clone(), package.destination().clone()));
        handles.push(tokio::spawn(async move { provider.quote(&package).await }));
    }

    join_all(handles)
        .await
        .into_iter()
        .zip(labels)
        .map(|(joined, (kind, origin, destination))| match joined {
            Ok(set) => set,
            Err(e) => {
                error!(provider = %kind, %origin, %destination, error = %e, "provider task panicked");
                QuoteSet::failed(kind, origin, destination)
            }
        })
        .collect()
}

/// Classifies quote sets by leg and sums the dealer legs.
///
/// With no dealer packages every set belongs to the customer leg. Otherwise
/// a set whose origin is the customer package's origin is customer leg and
/// everything else is dealer leg.
#[must_use]
pub fn join(customer_origin: &PostalCode, dealer_package_count: usize, sets: &[QuoteSet]) -> LegQuotes {
    let mut legs = LegQuotes {
        dealer: DealerLegQuotes {
            package_count: dealer_package_count,
            ..DealerLegQuotes::default()
        },
        ..LegQuotes::default()
    };

    let mut dealer_national: Vec<&QuoteSet> = Vec::new();
    let mut dealer_table: Vec<&QuoteSet> = Vec::new();

    for set in sets.iter().filter(|s| s.is_success()) {
        let customer_leg = dealer_package_count == 0 || set.origin() == customer_origin;
        match (customer_leg, set.kind()) {
            (true, CarrierKind::NationalCarrier) => legs.customer.national.extend_from_slice(set.quotes()),
            (true, CarrierKind::RegionalTable) => legs.customer.regional.extend_from_slice(set.quotes()),
            (true, CarrierKind::LocalCourier) => legs.customer.courier.extend_from_slice(set.quotes()),
            (false, CarrierKind::NationalCarrier) => dealer_national.push(set),
            (false, CarrierKind::DealerTable) => dealer_table.push(set),
            (customer_leg, kind) => {
                debug!(provider = %kind, customer_leg, origin = %set.origin(), "ignoring quote set on unexpected leg");
            }
        }
    }

    legs.dealer.national = sum_dealer_leg(&dealer_national, dealer_package_count);
    legs.dealer.table = sum_dealer_leg(&dealer_table, dealer_package_count);
    legs
}

/// Sums quotes per grouping key across dealer packages.
///
/// Prices add up and the deadline is the slowest package's. Each set
/// contributes at most once per key, and only keys present in
/// `package_count` sets survive. Keys keep their first-seen order.
#[must_use]
pub fn sum_dealer_leg(sets: &[&QuoteSet], package_count: usize) -> Vec<Quote> {
    let mut sums: Vec<(Quote, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for set in sets {
        let mut seen: HashSet<&str> = HashSet::new();
        for quote in set.quotes() {
            let key = quote.grouping_key();
            if !seen.insert(key) {
                continue;
            }
            match index.get(key).and_then(|&i| sums.get_mut(i)) {
                Some((sum, count)) => {
                    *sum = summed(sum, quote);
                    *count += 1;
                }
                None => {
                    index.insert(key.to_string(), sums.len());
                    sums.push((quote.clone(), 1));
                }
            }
        }
    }

    sums.into_iter()
        .filter(|(_, count)| *count == package_count)
        .map(|(quote, _)| quote)
        .collect()
}

fn summed(acc: &Quote, next: &Quote) -> Quote {
    Quote::new(
        acc.kind(),
        acc.carrier(),
        acc.price().saturating_add(next.price()),
        acc.deadline_days().max(next.deadline_days()),
    )
    .with_service(acc.service_code(), acc.service_description())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Price;
    use crate::infrastructure::providers::ProviderResult;
    use async_trait::async_trait;

    fn cep(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    const WAREHOUSE: &str = "31110700";
    const CUSTOMER: &str = "01310100";
    const DEALER_A: &str = "87050000";
    const DEALER_B: &str = "13087000";

    fn national(code: &str, cents: i64, days: u32) -> Quote {
        Quote::new(CarrierKind::NationalCarrier, "Correios", Price::from_cents(cents).unwrap(), days)
            .with_service(code, "svc")
    }

    fn set(kind: CarrierKind, origin: &str, quotes: Vec<Quote>) -> QuoteSet {
        QuoteSet::from_quotes(kind, cep(origin), cep(WAREHOUSE), quotes)
    }

    #[test]
    fn dealer_sums_keep_only_fully_covered_codes() {
        let a = set(
            CarrierKind::NationalCarrier,
            DEALER_A,
            vec![national("04510", 1000, 5), national("04014", 2000, 2)],
        );
        let b = set(CarrierKind::NationalCarrier, DEALER_B, vec![national("04510", 1500, 7)]);

        let sums = sum_dealer_leg(&[&a, &b], 2);
        assert_eq!(sums.len(), 1);
        assert_eq!(sums[0].service_code(), "04510");
        assert_eq!(sums[0].price().to_string(), "25.00");
        assert_eq!(sums[0].deadline_days(), 7);
    }

    #[test]
    fn a_package_counts_once_per_code() {
        let a = set(
            CarrierKind::NationalCarrier,
            DEALER_A,
            vec![national("04510", 1000, 5), national("04510", 1200, 6)],
        );
        let b = set(CarrierKind::NationalCarrier, DEALER_B, vec![national("04014", 1500, 2)]);
        assert!(sum_dealer_leg(&[&a, &b], 2).is_empty());
    }

    #[test]
    fn join_classifies_by_origin_and_kind() {
        let courier = Quote::new(CarrierKind::LocalCourier, "Motoboy", Price::from_cents(1500).unwrap(), 1);
        let table = Quote::new(CarrierKind::DealerTable, "Transportadora 1", Price::from_cents(900).unwrap(), 3);
        let sets = vec![
            set(CarrierKind::NationalCarrier, WAREHOUSE, vec![national("04510", 2000, 6)]),
            set(CarrierKind::LocalCourier, WAREHOUSE, vec![courier]),
            QuoteSet::failed(CarrierKind::RegionalTable, cep(WAREHOUSE), cep(CUSTOMER)),
            set(CarrierKind::NationalCarrier, DEALER_A, vec![national("04510", 1000, 4)]),
            set(CarrierKind::DealerTable, DEALER_A, vec![table]),
        ];

        let legs = join(&cep(WAREHOUSE), 1, &sets);
        assert_eq!(legs.customer.national.len(), 1);
        assert_eq!(legs.customer.courier.len(), 1);
        assert!(legs.customer.regional.is_empty());
        assert_eq!(legs.dealer.package_count, 1);
        assert_eq!(legs.dealer.national.len(), 1);
        assert_eq!(legs.dealer.table.len(), 1);
    }

    #[test]
    fn direct_plans_put_every_set_on_the_customer_leg() {
        let sets = vec![set(CarrierKind::NationalCarrier, DEALER_A, vec![national("04510", 2000, 6)])];
        let legs = join(&cep(WAREHOUSE), 0, &sets);
        assert_eq!(legs.customer.national.len(), 1);
        assert!(legs.dealer.national.is_empty());
    }

    #[derive(Debug)]
    struct Fixed {
        kind: CarrierKind,
        quotes: Vec<Quote>,
    }

    #[async_trait]
    impl QuoteProvider for Fixed {
        fn kind(&self) -> CarrierKind {
            self.kind
        }

        async fn try_quote(&self, _package: &Package) -> ProviderResult<Vec<Quote>> {
            Ok(self.quotes.clone())
        }
    }

    #[derive(Debug)]
    struct Panicking;

    #[async_trait]
    impl QuoteProvider for Panicking {
        fn kind(&self) -> CarrierKind {
            CarrierKind::RegionalTable
        }

        #[allow(clippy::panic)]
        async fn try_quote(&self, _package: &Package) -> ProviderResult<Vec<Quote>> {
            panic!("rate table exploded")
        }
    }

    fn package(origin: &str, dest: &str) -> Package {
        Package::new(cep(origin), cep(dest), (30, 20, 10), 1500).unwrap()
    }

    #[tokio::test]
    async fn collect_survives_a_panicking_provider() {
        let engine = FreightAggregationEngine::new(QuoteProviders {
            national: Arc::new(Fixed {
                kind: CarrierKind::NationalCarrier,
                quotes: vec![national("04510", 2000, 6)],
            }),
            regional: Arc::new(Panicking),
            courier: Arc::new(Fixed {
                kind: CarrierKind::LocalCourier,
                quotes: Vec::new(),
            }),
            dealer_table: None,
        });

        let plan = LegPlan::direct(package(WAREHOUSE, CUSTOMER));
        let legs = engine.collect(&plan).await;
        assert_eq!(legs.customer.national.len(), 1);
        assert!(legs.customer.regional.is_empty());
        assert!(legs.customer.courier.is_empty());
    }
}
