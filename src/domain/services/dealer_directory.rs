//! # Dealer Directory
//!
//! Static knowledge about the external dealers the store resells for.
//!
//! Each dealer stock location ships from a known postal code. Some dealers
//! need extra lead time before a parcel leaves their premises, and some
//! have a storefront deadline surcharge.

use crate::domain::value_objects::PostalCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One dealer stock location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerProfile {
    /// Dealer name.
    pub name: String,
    /// Stock location; empty when the dealer has a single location.
    #[serde(default)]
    pub stock_location: String,
    /// Postal code the dealer ships from.
    pub postal_code: PostalCode,
    /// Minimum days before the parcel ships.
    #[serde(default)]
    pub shipment_delay_days: u32,
    /// Extra days added to storefront deadlines.
    #[serde(default)]
    pub deadline_surcharge_days: u32,
}

impl DealerProfile {
    /// Creates a profile with no delay or surcharge.
    #[must_use]
    pub fn new(name: impl Into<String>, stock_location: impl Into<String>, postal_code: PostalCode) -> Self {
        Self {
            name: name.into(),
            stock_location: stock_location.into(),
            postal_code,
            shipment_delay_days: 0,
            deadline_surcharge_days: 0,
        }
    }

    /// Sets the shipment delay.
    #[must_use]
    pub fn with_shipment_delay(mut self, days: u32) -> Self {
        self.shipment_delay_days = days;
        self
    }

    /// Sets the storefront deadline surcharge.
    #[must_use]
    pub fn with_deadline_surcharge(mut self, days: u32) -> Self {
        self.deadline_surcharge_days = days;
        self
    }

    /// Grouping key of this profile.
    #[must_use]
    pub fn key(&self) -> String {
        DealerDirectory::group_key(&self.name, &self.stock_location)
    }
}

/// Lookup table of dealer profiles.
///
/// # Examples
///
/// ```
/// use freight_quote::domain::services::dealer_directory::{DealerDirectory, DealerProfile};
/// use freight_quote::domain::value_objects::PostalCode;
///
/// let directory = DealerDirectory::new([
///     DealerProfile::new("AllNations", "ES", PostalCode::parse("29161376").unwrap()),
/// ]);
/// assert!(directory.lookup("allnations", "es").is_some());
/// assert!(directory.lookup("allnations", "rj").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DealerDirectory {
    profiles: HashMap<String, DealerProfile>,
}

impl DealerDirectory {
    /// Builds a directory; later profiles with the same key win.
    #[must_use]
    pub fn new(profiles: impl IntoIterator<Item = DealerProfile>) -> Self {
        let profiles = profiles.into_iter().map(|p| (p.key(), p)).collect();
        Self { profiles }
    }

    /// Key grouping line items: `dealer` or `dealer_location`, lowercase.
    #[must_use]
    pub fn group_key(dealer: &str, stock_location: &str) -> String {
        let dealer = dealer.trim().to_lowercase();
        let location = stock_location.trim().to_lowercase();
        if location.is_empty() {
            dealer
        } else {
            format!("{dealer}_{location}")
        }
    }

    /// Finds the profile for a dealer location.
    ///
    /// Falls back to the dealer's location-less profile.
    #[must_use]
    pub fn lookup(&self, dealer: &str, stock_location: &str) -> Option<&DealerProfile> {
        self.profiles
            .get(&Self::group_key(dealer, stock_location))
            .or_else(|| self.profiles.get(&Self::group_key(dealer, "")))
    }

    /// Shipment delay for a dealer location; zero when unknown.
    #[must_use]
    pub fn shipment_delay(&self, dealer: &str, stock_location: &str) -> u32 {
        self.lookup(dealer, stock_location)
            .map(|p| p.shipment_delay_days)
            .unwrap_or(0)
    }

    /// Largest storefront surcharge across a dealer's locations.
    #[must_use]
    pub fn deadline_surcharge(&self, dealer: &str) -> u32 {
        let name = dealer.trim().to_lowercase();
        self.profiles
            .values()
            .filter(|p| p.name.trim().to_lowercase() == name)
            .map(|p| p.deadline_surcharge_days)
            .max()
            .unwrap_or(0)
    }

    /// Largest storefront surcharge among `dealers`; zero when none is flagged.
    #[must_use]
    pub fn max_deadline_surcharge<'a>(&self, dealers: impl IntoIterator<Item = &'a str>) -> u32 {
        dealers
            .into_iter()
            .map(|d| self.deadline_surcharge(d))
            .max()
            .unwrap_or(0)
    }

    /// Number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if no dealer is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn directory() -> DealerDirectory {
        DealerDirectory::new([
            DealerProfile::new("aldo", "", PostalCode::parse("87020025").unwrap())
                .with_shipment_delay(3)
                .with_deadline_surcharge(3),
            DealerProfile::new("allnations", "rj", PostalCode::parse("20911290").unwrap()),
            DealerProfile::new("allnations", "sc", PostalCode::parse("88311600").unwrap())
                .with_deadline_surcharge(1),
        ])
    }

    #[test]
    fn group_key_format() {
        assert_eq!(DealerDirectory::group_key("Aldo", ""), "aldo");
        assert_eq!(DealerDirectory::group_key(" AllNations ", "SC"), "allnations_sc");
    }

    #[test]
    fn lookup_falls_back_to_dealer_profile() {
        let dir = directory();
        assert_eq!(dir.lookup("ALDO", "PR").unwrap().postal_code.as_str(), "87020025");
        assert!(dir.lookup("allnations", "").is_none());
        assert!(dir.lookup("unknown", "").is_none());
    }

    #[test]
    fn delay_and_surcharge() {
        let dir = directory();
        assert_eq!(dir.shipment_delay("aldo", ""), 3);
        assert_eq!(dir.shipment_delay("allnations", "rj"), 0);
        assert_eq!(dir.deadline_surcharge("Aldo"), 3);
        assert_eq!(dir.deadline_surcharge("allnations"), 1);
        assert_eq!(dir.deadline_surcharge(""), 0);
    }

    #[test]
    fn order_surcharge_is_the_largest_among_dealers() {
        let dir = directory();
        assert_eq!(dir.max_deadline_surcharge(["allnations", "", "aldo"]), 3);
        assert_eq!(dir.max_deadline_surcharge(["", "unknown"]), 0);
        assert_eq!(dir.max_deadline_surcharge(None), 0);
    }
}
