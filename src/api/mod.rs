//! # API Layer
//!
//! HTTP interface of the freight service.
//!
//! - **REST**: freight estimates and rate table administration
//! - **Middleware**: HTTP Basic authentication with per-route allow-lists

pub mod middleware;
pub mod rest;
