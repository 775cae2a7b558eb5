//! # Use Cases
//!
//! Application use cases implementing the freight workflows.

pub mod estimate_freight;

pub use estimate_freight::{EstimateFreightUseCase, PackedShipment};
