//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! ## Freight
//! - `GET|POST /freights/zunka` - Storefront estimate
//! - `GET|POST /freights/zoom` - Marketplace estimate
//!
//! ## Rate tables
//! - `/freights/region`, `/freights/courier`, `/freights/dealer` - CRUD
//!
//! ## Health
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::{AppState, ErrorResponse};
pub use routes::create_router;
