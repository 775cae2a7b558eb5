//! # REST Routes
//!
//! Route definitions for the REST API.
//!
//! # Route Structure
//!
//! ```text
//! /
//! ├── /health                  GET        - Health check (no auth)
//! └── /freights
//!     ├── /zunka               GET, POST  - Storefront estimate
//!     ├── /zoom                GET, POST  - Marketplace estimate
//!     ├── /region              GET, POST  - Region rates
//!     │   └── /{id}            GET, PUT, DELETE
//!     ├── /courier             GET, POST  - Courier rates
//!     │   └── /{id}            GET, PUT, DELETE
//!     └── /dealer              GET, POST  - Dealer rates
//!         └── /{id}            GET, PUT, DELETE
//! ```
//!
//! Each route group sits behind its own Basic-auth allow-list.

use crate::api::middleware::auth::{RouteAccess, basic_auth_middleware};
use crate::api::rest::handlers::{
    AppState, create_courier_rate, create_dealer_rate, create_region_rate, delete_courier_rate,
    delete_dealer_rate, delete_region_rate, get_courier_rate, get_dealer_rate, get_region_rate,
    health_check, list_courier_rates, list_dealer_rates, list_region_rates, marketplace_freight,
    storefront_freight, update_courier_rate, update_dealer_rate, update_region_rate,
};
use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Creates the REST API router with all endpoints.
pub fn create_router(state: Arc<AppState>) -> Router {
    routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

fn routes(state: Arc<AppState>) -> Router {
    let storefront = guarded(
        Router::new().route("/zunka", get(storefront_freight).post(storefront_freight)),
        state.access.storefront.clone(),
    );

    let marketplace = guarded(
        Router::new().route("/zoom", get(marketplace_freight).post(marketplace_freight)),
        state.access.marketplace.clone(),
    );

    let admin = guarded(
        Router::new()
            .route("/region", get(list_region_rates).post(create_region_rate))
            .route(
                "/region/{id}",
                get(get_region_rate).put(update_region_rate).delete(delete_region_rate),
            )
            .route("/courier", get(list_courier_rates).post(create_courier_rate))
            .route(
                "/courier/{id}",
                get(get_courier_rate).put(update_courier_rate).delete(delete_courier_rate),
            )
            .route("/dealer", get(list_dealer_rates).post(create_dealer_rate))
            .route(
                "/dealer/{id}",
                get(get_dealer_rate).put(update_dealer_rate).delete(delete_dealer_rate),
            ),
        state.access.admin.clone(),
    );

    Router::new()
        .route("/health", get(health_check))
        .nest("/freights", storefront.merge(marketplace).merge(admin))
        .with_state(state)
}

fn guarded(router: Router<Arc<AppState>>, access: Arc<RouteAccess>) -> Router<Arc<AppState>> {
    router.route_layer(middleware::from_fn_with_state(access, basic_auth_middleware))
}

/// Router without tracing or CORS layers.
#[cfg(test)]
pub fn create_test_router(state: Arc<AppState>) -> Router {
    routes(state)
}
