//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`CarrierKind`] - Which quote provider produced a quote
//! - [`Region`] - Geographic region used by the regional rate table
//!
//! Both implement `Display`, `FromStr`, and Serde traits.

use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of freight source a quote came from.
///
/// # Examples
///
/// ```
/// use freight_quote::domain::value_objects::CarrierKind;
///
/// assert!(CarrierKind::NationalCarrier.is_national());
/// assert_eq!(CarrierKind::LocalCourier.to_string(), "LOCAL_COURIER");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarrierKind {
    /// National postal carrier web service.
    NationalCarrier,
    /// Region-based fixed rate table.
    RegionalTable,
    /// Same-day local courier.
    LocalCourier,
    /// Dealer-specific fixed rate table.
    DealerTable,
}

impl CarrierKind {
    /// Returns true for the national postal carrier.
    #[inline]
    #[must_use]
    pub const fn is_national(self) -> bool {
        matches!(self, Self::NationalCarrier)
    }

    /// Returns true for the table-based carriers.
    #[inline]
    #[must_use]
    pub const fn is_table(self) -> bool {
        matches!(self, Self::RegionalTable | Self::DealerTable)
    }

    /// Returns true for the local courier.
    #[inline]
    #[must_use]
    pub const fn is_courier(self) -> bool {
        matches!(self, Self::LocalCourier)
    }
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NationalCarrier => "NATIONAL_CARRIER",
            Self::RegionalTable => "REGIONAL_TABLE",
            Self::LocalCourier => "LOCAL_COURIER",
            Self::DealerTable => "DEALER_TABLE",
        };
        f.write_str(s)
    }
}

impl FromStr for CarrierKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NATIONAL_CARRIER" => Ok(Self::NationalCarrier),
            "REGIONAL_TABLE" => Ok(Self::RegionalTable),
            "LOCAL_COURIER" => Ok(Self::LocalCourier),
            "DEALER_TABLE" => Ok(Self::DealerTable),
            _ => Err(DomainError::invalid_enum("CarrierKind", s)),
        }
    }
}

/// Geographic region of a destination.
///
/// # Examples
///
/// ```
/// use freight_quote::domain::value_objects::Region;
///
/// assert_eq!(Region::from_state("SP"), Some(Region::Southeast));
/// assert_eq!(Region::from_state("xx"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Norte.
    North,
    /// Nordeste.
    Northeast,
    /// Centro-Oeste.
    Midwest,
    /// Sudeste.
    Southeast,
    /// Sul.
    South,
}

impl Region {
    /// All regions.
    pub const ALL: [Self; 5] = [
        Self::North,
        Self::Northeast,
        Self::Midwest,
        Self::Southeast,
        Self::South,
    ];

    /// Maps a two-letter state code to its region, case-insensitively.
    #[must_use]
    pub fn from_state(state: &str) -> Option<Self> {
        match state.trim().to_lowercase().as_str() {
            "ro" | "ac" | "am" | "rr" | "pa" | "ap" | "to" => Some(Self::North),
            "ma" | "pi" | "ce" | "rn" | "pb" | "pe" | "al" | "se" | "ba" => Some(Self::Northeast),
            "ms" | "mt" | "go" | "df" => Some(Self::Midwest),
            "mg" | "es" | "rj" | "sp" => Some(Self::Southeast),
            "pr" | "sc" | "rs" => Some(Self::South),
            _ => None,
        }
    }

    /// Returns the lowercase name used in storage and cache entries.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::Midwest => "midwest",
            Self::Southeast => "southeast",
            Self::South => "south",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| DomainError::invalid_enum("Region", s))
    }
}
