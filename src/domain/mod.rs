//! # Domain Layer
//!
//! Freight domain model: packages, quotes, rate tables and the pure
//! services that build shipments and combine leg quotes.

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
