//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`PostalCode`]: eight-digit postal code
//! - [`Price`]: non-negative decimal amount
//! - [`CarrierKind`]: provider that produced a quote
//! - [`Region`]: destination region for the regional rate table

pub mod enums;
pub mod postal_code;
pub mod price;

pub use enums::{CarrierKind, Region};
pub use postal_code::PostalCode;
pub use price::Price;
