//! # Domain Services
//!
//! Pure business logic with no I/O.
//!
//! - [`shipment_builder`]: packs line items into a package
//! - [`leg_planner`]: splits an order into dealer and customer legs
//! - [`leg_combiner`]: merges per-leg quotes into final offers
//! - [`dealer_directory`]: dealer origins, delays and surcharges

pub mod dealer_directory;
pub mod leg_combiner;
pub mod leg_planner;
pub mod shipment_builder;

pub use dealer_directory::{DealerDirectory, DealerProfile};
pub use leg_combiner::{CustomerLegQuotes, DealerLegQuotes, LegCombiner};
pub use leg_planner::{DealerGroup, LegPlan, LegPlanner};
pub use shipment_builder::ShipmentBuilder;
