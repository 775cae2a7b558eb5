//! # Leg Planner
//!
//! Decides whether an order ships directly from the warehouse or needs a
//! dealer leg first.
//!
//! Products held by a known dealer travel dealer → warehouse before the
//! warehouse → customer leg. Products without a known dealer are assumed
//! to be in the warehouse already.

use crate::domain::entities::{Package, ProductLineItem};
use crate::domain::errors::DomainResult;
use crate::domain::services::dealer_directory::DealerDirectory;
use crate::domain::services::shipment_builder::ShipmentBuilder;
use crate::domain::value_objects::PostalCode;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Line items routed through one dealer leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerGroup {
    /// Lowercase `dealer` or `dealer_location` key.
    pub key: String,
    /// Dealer name as supplied on the first item.
    pub dealer: String,
    /// Stock location as supplied on the first item.
    pub stock_location: String,
    /// Items in the group.
    pub items: Vec<ProductLineItem>,
}

/// Packages to quote for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegPlan {
    dealer_packages: Vec<Package>,
    customer_package: Package,
}

impl LegPlan {
    /// A plan with only the warehouse → customer leg.
    #[must_use]
    pub fn direct(customer_package: Package) -> Self {
        Self {
            dealer_packages: Vec::new(),
            customer_package,
        }
    }

    /// Dealer → warehouse packages.
    #[must_use]
    pub fn dealer_packages(&self) -> &[Package] {
        &self.dealer_packages
    }

    /// Warehouse → customer package.
    #[must_use]
    pub fn customer_package(&self) -> &Package {
        &self.customer_package
    }

    /// Returns true when no dealer leg is needed.
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.dealer_packages.is_empty()
    }
}

/// Splits orders into legs.
#[derive(Debug, Clone)]
pub struct LegPlanner {
    builder: ShipmentBuilder,
    dealers: Arc<DealerDirectory>,
}

impl LegPlanner {
    /// Creates a planner.
    #[must_use]
    pub fn new(builder: ShipmentBuilder, dealers: Arc<DealerDirectory>) -> Self {
        Self { builder, dealers }
    }

    /// Groups items by lowercase dealer and stock location, in key order.
    #[must_use]
    pub fn group_by_dealer(items: &[ProductLineItem]) -> Vec<DealerGroup> {
        let mut groups: BTreeMap<String, DealerGroup> = BTreeMap::new();
        for item in items {
            let key = DealerDirectory::group_key(&item.dealer, &item.stock_location);
            groups
                .entry(key.clone())
                .or_insert_with(|| DealerGroup {
                    key,
                    dealer: item.dealer.clone(),
                    stock_location: item.stock_location.clone(),
                    items: Vec::new(),
                })
                .items
                .push(item.clone());
        }
        groups.into_values().collect()
    }

    /// Plans the legs for an order.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any item is invalid; no package is
    /// built in that case.
    pub fn plan(&self, items: &[ProductLineItem], destination: PostalCode) -> DomainResult<LegPlan> {
        ShipmentBuilder::validate(items)?;

        let warehouse = self.builder.warehouse().clone();
        let mut dealer_packages = Vec::new();

        for group in Self::group_by_dealer(items) {
            if group.dealer.trim().is_empty() {
                continue;
            }
            let Some(profile) = self.dealers.lookup(&group.dealer, &group.stock_location) else {
                continue;
            };
            if profile.postal_code == warehouse {
                continue;
            }

            let package = self
                .builder
                .build(&group.items, warehouse.clone(), Some(profile.postal_code.clone()))?
                .with_dealer(profile.name.to_lowercase());
            dealer_packages.push(package);
        }

        let customer_package = self.builder.build(items, destination, None)?;

        Ok(LegPlan {
            dealer_packages,
            customer_package,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::services::dealer_directory::DealerProfile;
    use crate::domain::value_objects::Price;

    const WAREHOUSE: &str = "31110700";

    fn cep(s: &str) -> PostalCode {
        PostalCode::parse(s).unwrap()
    }

    fn planner() -> LegPlanner {
        let dealers = Arc::new(DealerDirectory::new([
            DealerProfile::new("aldo", "", cep("87020025")).with_shipment_delay(3),
            DealerProfile::new("allnations", "rj", cep("20911290")),
            DealerProfile::new("allnations", "sc", cep("88311600")),
            DealerProfile::new("local", "", cep(WAREHOUSE)),
        ]));
        let builder = ShipmentBuilder::new(cep(WAREHOUSE), dealers.clone());
        LegPlanner::new(builder, dealers)
    }

    fn item(id: &str, dealer: &str, location: &str) -> ProductLineItem {
        ProductLineItem::new(id, (20, 10, 5), 1000, Price::from_cents(10000).unwrap())
            .with_dealer(dealer, location)
    }

    #[test]
    fn groups_by_dealer_and_location_case_insensitive() {
        let items = vec![
            item("1", "AllNations", "RJ"),
            item("2", "allnations", "rj"),
            item("3", "allnations", "sc"),
            item("4", "", ""),
        ];
        let groups = LegPlanner::group_by_dealer(&items);
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["", "allnations_rj", "allnations_sc"]);
        assert_eq!(groups[1].items.len(), 2);
    }

    #[test]
    fn warehouse_items_ship_direct() {
        let plan = planner()
            .plan(&[item("1", "", ""), item("2", "unknown", "")], cep("01310100"))
            .unwrap();
        assert!(plan.is_direct());
        assert_eq!(plan.customer_package().origin().as_str(), WAREHOUSE);
        assert_eq!(plan.customer_package().destination().as_str(), "01310100");
    }

    #[test]
    fn dealer_items_get_their_own_leg() {
        let items = vec![
            item("1", "allnations", "rj"),
            item("2", "allnations", "sc"),
            item("3", "aldo", ""),
            item("4", "", ""),
        ];
        let plan = planner().plan(&items, cep("01310100")).unwrap();

        assert_eq!(plan.dealer_packages().len(), 3);
        for pkg in plan.dealer_packages() {
            assert_eq!(pkg.destination().as_str(), WAREHOUSE);
        }
        let origins: Vec<&str> = plan.dealer_packages().iter().map(|p| p.origin().as_str()).collect();
        assert_eq!(origins, vec!["87020025", "20911290", "88311600"]);
        assert_eq!(plan.dealer_packages()[0].shipment_delay_days(), 3);

        // every item rides the customer leg
        assert_eq!(plan.customer_package().height_cm(), 20);
        assert_eq!(plan.customer_package().weight_g(), 4000);
    }

    #[test]
    fn dealer_at_warehouse_needs_no_leg() {
        let plan = planner().plan(&[item("1", "local", "")], cep("01310100")).unwrap();
        assert!(plan.is_direct());
    }

    #[test]
    fn invalid_item_rejects_whole_plan() {
        let mut bad = item("2", "aldo", "");
        bad.length_cm = 0;
        let err = planner().plan(&[item("1", "", ""), bad], cep("01310100")).unwrap_err();
        assert_eq!(err, DomainError::invalid_product("2", "length", 0));
    }
}
