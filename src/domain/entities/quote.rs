//! # Quote Entity
//!
//! Freight quotes and the per-call result set returned by providers.
//!
//! A [`Quote`] is one priced service offer. A [`QuoteSet`] groups the quotes
//! produced by a single provider call, together with the postal codes used
//! for the query so the aggregator can tell customer legs from dealer legs.

use crate::domain::value_objects::{CarrierKind, PostalCode, Price};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A priced freight option.
///
/// # Examples
///
/// ```
/// use freight_quote::domain::entities::quote::Quote;
/// use freight_quote::domain::value_objects::{CarrierKind, Price};
///
/// let quote = Quote::new(CarrierKind::NationalCarrier, "Correios", Price::from_cents(2350).unwrap(), 4)
///     .with_service("04510", "PAC");
/// assert_eq!(quote.grouping_key(), "04510");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    kind: CarrierKind,
    carrier: String,
    #[serde(default)]
    service_code: String,
    #[serde(default)]
    service_description: String,
    price: Price,
    deadline_days: u32,
}

impl Quote {
    /// Creates a quote without service fields.
    #[must_use]
    pub fn new(kind: CarrierKind, carrier: impl Into<String>, price: Price, deadline_days: u32) -> Self {
        Self {
            kind,
            carrier: carrier.into(),
            service_code: String::new(),
            service_description: String::new(),
            price,
            deadline_days,
        }
    }

    /// Sets the service code and description.
    #[must_use]
    pub fn with_service(mut self, code: impl Into<String>, description: impl Into<String>) -> Self {
        self.service_code = code.into();
        self.service_description = description.into();
        self
    }

    /// Replaces the carrier label.
    #[must_use]
    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = carrier.into();
        self
    }

    /// Drops the service code and description.
    #[must_use]
    pub fn without_service(mut self) -> Self {
        self.service_code.clear();
        self.service_description.clear();
        self
    }

    /// Adds days to the deadline.
    #[must_use]
    pub fn delayed_by(mut self, days: u32) -> Self {
        self.deadline_days = self.deadline_days.saturating_add(days);
        self
    }

    /// Combines this quote with the quote of another leg.
    ///
    /// Prices and deadlines add up; carrier and service come from `self`.
    #[must_use]
    pub fn chained_with(&self, next: &Self) -> Self {
        Self {
            price: self.price.saturating_add(next.price),
            deadline_days: self.deadline_days.saturating_add(next.deadline_days),
            ..self.clone()
        }
    }

    /// Provider kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> CarrierKind {
        self.kind
    }

    /// Carrier label.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> &str {
        &self.carrier
    }

    /// Service code; empty for table carriers.
    #[inline]
    #[must_use]
    pub fn service_code(&self) -> &str {
        &self.service_code
    }

    /// Service description.
    #[inline]
    #[must_use]
    pub fn service_description(&self) -> &str {
        &self.service_description
    }

    /// Price.
    #[inline]
    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    /// Deadline in days.
    #[inline]
    #[must_use]
    pub fn deadline_days(&self) -> u32 {
        self.deadline_days
    }

    /// Key used to match quotes across dealer packages.
    ///
    /// The service code when present, otherwise the carrier label.
    #[must_use]
    pub fn grouping_key(&self) -> &str {
        if self.service_code.is_empty() {
            &self.carrier
        } else {
            &self.service_code
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {} in {}d",
            self.carrier, self.service_code, self.price, self.deadline_days
        )
    }
}

/// Result of one provider call.
///
/// # Invariants
///
/// - `success` is true iff `quotes` is non-empty
/// - Every quote in a successful set has a positive price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSet {
    kind: CarrierKind,
    origin: PostalCode,
    destination: PostalCode,
    quotes: Vec<Quote>,
    success: bool,
}

impl QuoteSet {
    /// Builds a set from provider output, dropping quotes without a price.
    #[must_use]
    pub fn from_quotes(
        kind: CarrierKind,
        origin: PostalCode,
        destination: PostalCode,
        quotes: Vec<Quote>,
    ) -> Self {
        let quotes: Vec<Quote> = quotes.into_iter().filter(|q| q.price.is_positive()).collect();
        let success = !quotes.is_empty();
        Self {
            kind,
            origin,
            destination,
            quotes,
            success,
        }
    }

    /// Builds a failed set.
    #[must_use]
    pub fn failed(kind: CarrierKind, origin: PostalCode, destination: PostalCode) -> Self {
        Self {
            kind,
            origin,
            destination,
            quotes: Vec::new(),
            success: false,
        }
    }

    /// Provider kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> CarrierKind {
        self.kind
    }

    /// Origin postal code used for the query.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &PostalCode {
        &self.origin
    }

    /// Destination postal code used for the query.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &PostalCode {
        &self.destination
    }

    /// Returns true if the provider produced at least one quote.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The quotes, in provider order.
    #[inline]
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Consumes the set, returning its quotes.
    #[must_use]
    pub fn into_quotes(self) -> Vec<Quote> {
        self.quotes
    }
}
