//! # Infrastructure Layer
//!
//! External adapters and implementations of domain ports.
//!
//! ## Providers
//!
//! Freight quote sources: national carrier, regional table, local courier
//! and dealer table.
//!
//! ## Persistence
//!
//! Rate table repositories:
//! - PostgreSQL repositories
//! - In-memory repositories for testing
//!
//! ## Supporting adapters
//!
//! - Shared cache (Redis or in-memory)
//! - Postal code resolution
//! - Product catalog
//! - Outbound HTTP client

pub mod cache;
pub mod catalog;
pub mod geo;
pub mod http_client;
pub mod persistence;
pub mod providers;
