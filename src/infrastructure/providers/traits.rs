//! # Quote Provider Trait
//!
//! Port definition for freight quote sources.
//!
//! Every source answers with a [`QuoteSet`]. Failures never propagate:
//! implementors fill in [`QuoteProvider::try_quote`] and the provided
//! [`QuoteProvider::quote`] logs any error and reports a failed set.

use crate::domain::entities::{Package, Quote, QuoteSet, RateBracket};
use crate::domain::value_objects::{CarrierKind, PostalCode};
use crate::infrastructure::providers::error::ProviderResult;
use async_trait::async_trait;
use std::fmt;
use tracing::{debug, warn};

/// A freight quote source.
#[async_trait]
pub trait QuoteProvider: Send + Sync + fmt::Debug {
    /// Kind of carrier this provider quotes for.
    fn kind(&self) -> CarrierKind;

    /// Origin reported on the quote set for `package`.
    fn quoted_origin<'a>(&'a self, package: &'a Package) -> &'a PostalCode {
        package.origin()
    }

    /// Quotes a package, surfacing failures.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` describing why no quote could be made.
    async fn try_quote(&self, package: &Package) -> ProviderResult<Vec<Quote>>;

    /// Quotes a package. Never fails; errors yield an unsuccessful set.
    async fn quote(&self, package: &Package) -> QuoteSet {
        let kind = self.kind();
        let origin = self.quoted_origin(package).clone();
        let destination = package.destination().clone();

        match self.try_quote(package).await {
            Ok(quotes) => {
                let set = QuoteSet::from_quotes(kind, origin, destination, quotes);
                debug!(
                    provider = %kind,
                    origin = %set.origin(),
                    destination = %set.destination(),
                    quotes = set.quotes().len(),
                    "provider answered"
                );
                set
            }
            Err(e) => {
                warn!(
                    provider = %kind,
                    %origin,
                    %destination,
                    error = %e,
                    "provider failed"
                );
                QuoteSet::failed(kind, origin, destination)
            }
        }
    }
}

/// Turns bracket rows into quotes labelled `Transportadora 1`, `Transportadora 2`, ...
///
/// Rows keep their order; rows without a positive price are skipped without
/// consuming an ordinal.
pub(crate) fn table_quotes<R: RateBracket>(kind: CarrierKind, rows: &[R]) -> Vec<Quote> {
    rows.iter()
        .filter_map(|row| {
            row.price()
                .filter(|p| p.is_positive())
                .map(|price| (price, row.deadline_days()))
        })
        .enumerate()
        .map(|(i, (price, days))| Quote::new(kind, format!("Transportadora {}", i + 1), price, days))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::DealerRate;
    use crate::domain::value_objects::Price;
    use crate::infrastructure::providers::error::ProviderError;

    #[derive(Debug)]
    struct Fixed(Option<Vec<Quote>>);

    #[async_trait]
    impl QuoteProvider for Fixed {
        fn kind(&self) -> CarrierKind {
            CarrierKind::RegionalTable
        }

        async fn try_quote(&self, _package: &Package) -> ProviderResult<Vec<Quote>> {
            self.0.clone().ok_or_else(|| ProviderError::no_rate("test"))
        }
    }

    fn package() -> Package {
        Package::new(
            PostalCode::parse("31110700").unwrap(),
            PostalCode::parse("01310100").unwrap(),
            (30, 20, 10),
            1500,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn failure_becomes_unsuccessful_set() {
        let set = Fixed(None).quote(&package()).await;
        assert!(!set.is_success());
        assert!(set.quotes().is_empty());
        assert_eq!(set.origin().as_str(), "31110700");
    }

    #[tokio::test]
    async fn quotes_are_wrapped() {
        let quote = Quote::new(
            CarrierKind::RegionalTable,
            "Transportadora 1",
            Price::from_cents(1200).unwrap(),
            4,
        );
        let set = Fixed(Some(vec![quote])).quote(&package()).await;
        assert!(set.is_success());
        assert_eq!(set.quotes()[0].carrier(), "Transportadora 1");
    }

    #[test]
    fn table_rows_are_numbered_in_order() {
        let now = chrono::Utc::now();
        let row = |id: i64, deadline_days: u32, price_cents: i64| DealerRate {
            id,
            dealer: "aldo".to_string(),
            weight_g: 2000,
            deadline_days,
            price_cents,
            created_at: now,
            updated_at: now,
        };
        let quotes = table_quotes(
            CarrierKind::DealerTable,
            &[row(1, 2, 1500), row(2, 3, 0), row(3, 5, 900)],
        );
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].carrier(), "Transportadora 1");
        assert_eq!(quotes[0].deadline_days(), 2);
        assert_eq!(quotes[1].carrier(), "Transportadora 2");
        assert_eq!(quotes[1].deadline_days(), 5);
        assert!(quotes.iter().all(|q| q.service_code().is_empty()));
    }
}
