//! # Dealer Table Provider
//!
//! Fixed-price quotes by dealer and weight bracket, for dealer legs.

use crate::domain::entities::{Package, Quote};
use crate::domain::value_objects::CarrierKind;
use crate::infrastructure::persistence::DealerRateRepository;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::{QuoteProvider, table_quotes};
use async_trait::async_trait;
use std::sync::Arc;

/// Quote provider over the dealer rate table.
#[derive(Debug, Clone)]
pub struct DealerTableProvider {
    rates: Arc<dyn DealerRateRepository>,
}

impl DealerTableProvider {
    /// Creates a provider.
    #[must_use]
    pub fn new(rates: Arc<dyn DealerRateRepository>) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl QuoteProvider for DealerTableProvider {
    fn kind(&self) -> CarrierKind {
        CarrierKind::DealerTable
    }

    async fn try_quote(&self, package: &Package) -> ProviderResult<Vec<Quote>> {
        let dealer = package.dealer().ok_or(ProviderError::MissingDealer)?.to_lowercase();
        let rows = self.rates.find_bracket(&dealer, package.weight_g()).await?;
        if rows.is_empty() {
            return Err(ProviderError::no_rate(format!(
                "dealer {dealer} at {}g",
                package.weight_g()
            )));
        }
        Ok(table_quotes(self.kind(), &rows))
    }
}
