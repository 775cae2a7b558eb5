//! # Application Layer
//!
//! Orchestrates the domain and infrastructure into freight estimates.

pub mod error;
pub mod services;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
