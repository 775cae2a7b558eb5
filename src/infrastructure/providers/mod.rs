//! # Quote Providers
//!
//! Freight quote sources behind the [`QuoteProvider`] port.
//!
//! - [`NationalCarrierProvider`]: the national postal carrier, cached
//! - [`RegionalTableProvider`]: regional rate table
//! - [`LocalCourierProvider`]: same-day courier rate table
//! - [`DealerTableProvider`]: dealer rate table

pub mod dealer_table;
pub mod error;
pub mod local_courier;
pub mod national_carrier;
pub mod regional_table;
pub mod traits;

pub use dealer_table::DealerTableProvider;
pub use error::{ProviderError, ProviderResult};
pub use local_courier::LocalCourierProvider;
pub use national_carrier::{
    CarrierLimits, CarrierService, CorreiosClient, NationalCarrierClient, NationalCarrierProvider,
};
pub use regional_table::RegionalTableProvider;
pub use traits::QuoteProvider;
