//! # Rate Table Rows
//!
//! Fixed-price freight rates maintained by operators.
//!
//! Three tables exist:
//!
//! - [`RegionRate`]: price per destination region and weight bracket
//! - [`CourierRate`]: local courier price per city
//! - [`DealerRate`]: price per dealer and weight bracket
//!
//! Prices are stored as integer cents.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{Price, Region};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A row of a weight-bracketed rate table.
pub trait RateBracket {
    /// Upper weight of the bracket, in grams.
    fn weight_g(&self) -> u32;
    /// Delivery deadline in days.
    fn deadline_days(&self) -> u32;
    /// Price in cents.
    fn price_cents(&self) -> i64;

    /// Price as a [`Price`], if the stored cents are valid.
    fn price(&self) -> Option<Price> {
        Price::from_cents(self.price_cents()).ok()
    }
}

/// Selects the rows of the smallest bracket that still fits `weight_g`.
///
/// Rows are returned ordered by deadline. No row heavy enough yields an
/// empty list.
pub fn select_bracket<'a, R, I>(rows: I, weight_g: u32) -> Vec<R>
where
    R: RateBracket + Clone + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let candidates: Vec<&R> = rows.into_iter().filter(|r| r.weight_g() >= weight_g).collect();
    let Some(bracket) = candidates.iter().map(|r| r.weight_g()).min() else {
        return Vec::new();
    };

    let mut selected: Vec<R> = candidates
        .into_iter()
        .filter(|r| r.weight_g() == bracket)
        .cloned()
        .collect();
    selected.sort_by_key(|r| r.deadline_days());
    selected
}

/// Normalizes a city name for lookups.
///
/// Lowercases, trims, turns whitespace runs into `-` and strips diacritics.
///
/// # Examples
///
/// ```
/// use freight_quote::domain::entities::rate::normalize_city;
///
/// assert_eq!(normalize_city("  Belo   Horizonte "), "belo-horizonte");
/// assert_eq!(normalize_city("Contagem"), "contagem");
/// assert_eq!(normalize_city("São João del-Rei"), "sao-joao-del-rei");
/// ```
#[must_use]
pub fn normalize_city(city: &str) -> String {
    let stripped: String = city
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    stripped.split_whitespace().collect::<Vec<_>>().join("-")
}

fn validate_bracket(weight_g: u32, price_cents: i64) -> DomainResult<()> {
    if weight_g == 0 {
        return Err(DomainError::invalid_package("weight", weight_g));
    }
    if price_cents <= 0 {
        return Err(DomainError::invalid_package("price", price_cents));
    }
    Ok(())
}

// ============================================================================
// Region rates
// ============================================================================

/// Stored regional rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRate {
    /// Row id.
    pub id: i64,
    /// Destination region.
    pub region: Region,
    /// Bracket upper weight in grams.
    pub weight_g: u32,
    /// Deadline in days.
    pub deadline_days: u32,
    /// Price in cents.
    pub price_cents: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Regional rate fields supplied on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegionRate {
    /// Destination region.
    pub region: Region,
    /// Bracket upper weight in grams.
    pub weight_g: u32,
    /// Deadline in days.
    pub deadline_days: u32,
    /// Price in cents.
    pub price_cents: i64,
}

impl NewRegionRate {
    /// Checks weight and price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPackage` for a zero weight or non-positive price.
    pub fn validate(&self) -> DomainResult<()> {
        validate_bracket(self.weight_g, self.price_cents)
    }

    /// Business key `(region, weight, deadline)`.
    #[must_use]
    pub fn business_key(&self) -> String {
        format!("{}:{}:{}", self.region, self.weight_g, self.deadline_days)
    }
}

impl RateBracket for RegionRate {
    fn weight_g(&self) -> u32 {
        self.weight_g
    }
    fn deadline_days(&self) -> u32 {
        self.deadline_days
    }
    fn price_cents(&self) -> i64 {
        self.price_cents
    }
}

// ============================================================================
// Courier rates
// ============================================================================

/// Stored local courier rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourierRate {
    /// Row id.
    pub id: i64,
    /// Two-letter state code, lowercase.
    pub state: String,
    /// City name as entered.
    pub city: String,
    /// Normalized city name.
    pub city_norm: String,
    /// Deadline in days.
    pub deadline_days: u32,
    /// Price in cents.
    pub price_cents: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Courier rate fields supplied on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourierRate {
    /// Two-letter state code.
    pub state: String,
    /// City name.
    pub city: String,
    /// Deadline in days.
    pub deadline_days: u32,
    /// Price in cents.
    pub price_cents: i64,
}

impl NewCourierRate {
    /// Checks state, city and price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPackage` naming the bad field.
    pub fn validate(&self) -> DomainResult<()> {
        let state = self.state.trim();
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::invalid_package("state", &self.state));
        }
        if self.city_norm().is_empty() {
            return Err(DomainError::invalid_package("city", &self.city));
        }
        if self.price_cents <= 0 {
            return Err(DomainError::invalid_package("price", self.price_cents));
        }
        Ok(())
    }

    /// Lowercase state code.
    #[must_use]
    pub fn state_norm(&self) -> String {
        self.state.trim().to_lowercase()
    }

    /// Normalized city name.
    #[must_use]
    pub fn city_norm(&self) -> String {
        normalize_city(&self.city)
    }

    /// Business key `(state, city_norm)`.
    #[must_use]
    pub fn business_key(&self) -> String {
        format!("{}:{}", self.state_norm(), self.city_norm())
    }
}

// ============================================================================
// Dealer rates
// ============================================================================

/// Stored dealer rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerRate {
    /// Row id.
    pub id: i64,
    /// Dealer name, lowercase.
    pub dealer: String,
    /// Bracket upper weight in grams.
    pub weight_g: u32,
    /// Deadline in days.
    pub deadline_days: u32,
    /// Price in cents.
    pub price_cents: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Dealer rate fields supplied on create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDealerRate {
    /// Dealer name.
    pub dealer: String,
    /// Bracket upper weight in grams.
    pub weight_g: u32,
    /// Deadline in days.
    pub deadline_days: u32,
    /// Price in cents.
    pub price_cents: i64,
}

impl NewDealerRate {
    /// Checks dealer, weight and price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPackage` naming the bad field.
    pub fn validate(&self) -> DomainResult<()> {
        if self.dealer.trim().is_empty() {
            return Err(DomainError::invalid_package("dealer", &self.dealer));
        }
        validate_bracket(self.weight_g, self.price_cents)
    }

    /// Lowercase dealer name.
    #[must_use]
    pub fn dealer_norm(&self) -> String {
        self.dealer.trim().to_lowercase()
    }

    /// Business key `(dealer, weight, deadline)`.
    #[must_use]
    pub fn business_key(&self) -> String {
        format!("{}:{}:{}", self.dealer_norm(), self.weight_g, self.deadline_days)
    }
}

impl RateBracket for DealerRate {
    fn weight_g(&self) -> u32 {
        self.weight_g
    }
    fn deadline_days(&self) -> u32 {
        self.deadline_days
    }
    fn price_cents(&self) -> i64 {
        self.price_cents
    }
}
