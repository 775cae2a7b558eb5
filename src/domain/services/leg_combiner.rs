//! # Leg Combiner
//!
//! Merges per-leg quotes into the offers shown to the customer.
//!
//! Three strategies apply, in order:
//!
//! 1. **Exact match**: a customer-leg national carrier service also quoted
//!    on every dealer leg is offered with summed price and deadline.
//! 2. **Fallback**: with no exact match, the fastest options of both legs
//!    are paired, and so are the slowest.
//! 3. **Direct**: with no dealer leg, customer-leg quotes pass through.

use crate::domain::entities::Quote;
use std::collections::HashMap;

/// Label of the fastest fallback offer.
pub const FALLBACK_FAST_LABEL: &str = "Transportadora 1";

/// Label of the slowest fallback offer.
pub const FALLBACK_SLOW_LABEL: &str = "Transportadora 2";

/// Successful quotes for the warehouse → customer leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerLegQuotes {
    /// National carrier quotes.
    pub national: Vec<Quote>,
    /// Regional table quotes.
    pub regional: Vec<Quote>,
    /// Local courier quotes.
    pub courier: Vec<Quote>,
}

impl CustomerLegQuotes {
    /// Preferred candidates: national carrier, else regional table.
    #[must_use]
    pub fn candidates(&self) -> &[Quote] {
        if self.national.is_empty() {
            &self.regional
        } else {
            &self.national
        }
    }
}

/// Dealer-leg quotes summed across every dealer package.
///
/// Only keys quoted for all dealer packages are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealerLegQuotes {
    /// Number of dealer packages in the plan.
    pub package_count: usize,
    /// Summed national carrier quotes, one per service code.
    pub national: Vec<Quote>,
    /// Summed dealer table quotes, one per label.
    pub table: Vec<Quote>,
}

impl DealerLegQuotes {
    /// Preferred candidates: national carrier, else dealer table.
    #[must_use]
    pub fn candidates(&self) -> &[Quote] {
        if self.national.is_empty() {
            &self.table
        } else {
            &self.national
        }
    }
}

/// Stateless combiner.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegCombiner;

impl LegCombiner {
    /// Produces the final offers.
    ///
    /// `include_courier` only matters for direct shipments: the courier
    /// delivers from the warehouse and cannot carry a dealer leg.
    #[must_use]
    pub fn combine(
        customer: &CustomerLegQuotes,
        dealer: &DealerLegQuotes,
        include_courier: bool,
    ) -> Vec<Quote> {
        if dealer.package_count == 0 {
            return Self::direct(customer, include_courier);
        }

        let exact = Self::exact_match(customer, dealer);
        if !exact.is_empty() {
            return exact;
        }

        Self::fallback(customer.candidates(), dealer.candidates())
    }

    /// Direct shipment offers.
    #[must_use]
    pub fn direct(customer: &CustomerLegQuotes, include_courier: bool) -> Vec<Quote> {
        let mut offers = customer.candidates().to_vec();
        if include_courier {
            offers.extend(customer.courier.iter().cloned());
        }
        offers
    }

    /// Customer-leg national quotes whose service code also exists on the
    /// dealer leg.
    #[must_use]
    pub fn exact_match(customer: &CustomerLegQuotes, dealer: &DealerLegQuotes) -> Vec<Quote> {
        let by_code: HashMap<&str, &Quote> = dealer
            .national
            .iter()
            .filter(|q| !q.service_code().is_empty())
            .map(|q| (q.service_code(), q))
            .collect();

        customer
            .national
            .iter()
            .filter_map(|q| by_code.get(q.service_code()).map(|d| q.chained_with(d)))
            .collect()
    }

    /// Pairs the fastest and the slowest options of both legs.
    ///
    /// Returns no offers when either leg has none.
    #[must_use]
    pub fn fallback(customer_leg: &[Quote], dealer_leg: &[Quote]) -> Vec<Quote> {
        let (Some(fast_a), Some(slow_a)) = fastest_and_slowest(customer_leg) else {
            return Vec::new();
        };
        let (Some(fast_b), Some(slow_b)) = fastest_and_slowest(dealer_leg) else {
            return Vec::new();
        };

        vec![
            pair(fast_a, fast_b, FALLBACK_FAST_LABEL),
            pair(slow_a, slow_b, FALLBACK_SLOW_LABEL),
        ]
    }
}

fn fastest_and_slowest(quotes: &[Quote]) -> (Option<&Quote>, Option<&Quote>) {
    let fastest = quotes.iter().min_by_key(|q| q.deadline_days());
    let slowest = quotes.iter().max_by_key(|q| q.deadline_days());
    (fastest, slowest)
}

fn pair(customer_leg: &Quote, dealer_leg: &Quote, label: &str) -> Quote {
    let combined = customer_leg.chained_with(dealer_leg);
    if customer_leg.carrier() == dealer_leg.carrier() {
        combined
    } else {
        combined.with_carrier(label).without_service()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CarrierKind, Price};

    fn price(cents: i64) -> Price {
        Price::from_cents(cents).unwrap()
    }

    fn national(code: &str, cents: i64, days: u32) -> Quote {
        Quote::new(CarrierKind::NationalCarrier, "Correios", price(cents), days)
            .with_service(code, "svc")
    }

    fn table(kind: CarrierKind, n: usize, cents: i64, days: u32) -> Quote {
        Quote::new(kind, format!("Transportadora {n}"), price(cents), days)
    }

    fn courier() -> Quote {
        Quote::new(CarrierKind::LocalCourier, "Motoboy", price(1500), 1)
    }

    #[test]
    fn direct_prefers_national_and_appends_courier() {
        let customer = CustomerLegQuotes {
            national: vec![national("04014", 3000, 2), national("04510", 2000, 6)],
            regional: vec![table(CarrierKind::RegionalTable, 1, 1800, 4)],
            courier: vec![courier()],
        };
        let offers = LegCombiner::combine(&customer, &DealerLegQuotes::default(), true);
        let carriers: Vec<&str> = offers.iter().map(Quote::carrier).collect();
        assert_eq!(carriers, vec!["Correios", "Correios", "Motoboy"]);

        let without = LegCombiner::combine(&customer, &DealerLegQuotes::default(), false);
        assert_eq!(without.len(), 2);
    }

    #[test]
    fn direct_falls_back_to_regional() {
        let customer = CustomerLegQuotes {
            regional: vec![table(CarrierKind::RegionalTable, 1, 1800, 4)],
            ..Default::default()
        };
        let offers = LegCombiner::combine(&customer, &DealerLegQuotes::default(), false);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].kind(), CarrierKind::RegionalTable);
    }

    #[test]
    fn nothing_anywhere_is_empty() {
        let offers = LegCombiner::combine(
            &CustomerLegQuotes::default(),
            &DealerLegQuotes::default(),
            true,
        );
        assert!(offers.is_empty());
    }

    #[test]
    fn exact_match_sums_matching_codes() {
        let customer = CustomerLegQuotes {
            national: vec![national("04014", 3000, 2), national("04510", 2000, 6)],
            ..Default::default()
        };
        let dealer = DealerLegQuotes {
            package_count: 2,
            national: vec![national("04510", 4000, 8)],
            table: Vec::new(),
        };
        let offers = LegCombiner::combine(&customer, &dealer, true);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].service_code(), "04510");
        assert_eq!(offers[0].price(), price(6000));
        assert_eq!(offers[0].deadline_days(), 14);
    }

    #[test]
    fn multi_leg_never_offers_courier() {
        let customer = CustomerLegQuotes {
            national: vec![national("04014", 3000, 2)],
            courier: vec![courier()],
            ..Default::default()
        };
        let dealer = DealerLegQuotes {
            package_count: 1,
            national: vec![national("04014", 1000, 3)],
            table: Vec::new(),
        };
        let offers = LegCombiner::combine(&customer, &dealer, true);
        assert!(offers.iter().all(|q| !q.kind().is_courier()));
    }

    #[test]
    fn fallback_pairs_fastest_and_slowest() {
        let customer = CustomerLegQuotes {
            regional: vec![
                table(CarrierKind::RegionalTable, 1, 2000, 3),
                table(CarrierKind::RegionalTable, 2, 1500, 7),
            ],
            ..Default::default()
        };
        let dealer = DealerLegQuotes {
            package_count: 1,
            national: vec![national("04014", 5000, 2), national("04510", 2500, 9)],
            table: Vec::new(),
        };
        let offers = LegCombiner::combine(&customer, &dealer, true);

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].carrier(), FALLBACK_FAST_LABEL);
        assert_eq!(offers[0].price(), price(7000));
        assert_eq!(offers[0].deadline_days(), 5);
        assert!(offers[0].service_code().is_empty());
        assert_eq!(offers[1].carrier(), FALLBACK_SLOW_LABEL);
        assert_eq!(offers[1].price(), price(4000));
        assert_eq!(offers[1].deadline_days(), 16);
        assert!(offers[0].deadline_days() <= offers[1].deadline_days());
    }

    #[test]
    fn fallback_keeps_shared_carrier_name() {
        let a = vec![national("04014", 3000, 2)];
        let b = vec![national("04510", 2000, 5)];
        let offers = LegCombiner::fallback(&a, &b);
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].carrier(), "Correios");
        assert_eq!(offers[0].service_code(), "04014");
    }

    #[test]
    fn fallback_with_empty_leg_is_empty() {
        let a = vec![national("04014", 3000, 2)];
        assert!(LegCombiner::fallback(&a, &[]).is_empty());
        assert!(LegCombiner::fallback(&[], &a).is_empty());
    }

    #[test]
    fn dealer_table_used_when_dealer_national_missing() {
        let customer = CustomerLegQuotes {
            national: vec![national("04014", 3000, 2)],
            ..Default::default()
        };
        let dealer = DealerLegQuotes {
            package_count: 1,
            national: Vec::new(),
            table: vec![table(CarrierKind::DealerTable, 1, 900, 4)],
        };
        let offers = LegCombiner::combine(&customer, &dealer, false);
        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].price(), price(3900));
        assert_eq!(offers[0].deadline_days(), 6);
    }
}
