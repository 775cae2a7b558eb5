//! # REST Handlers
//!
//! Request handlers for the freight endpoints.
//!
//! # Endpoints
//!
//! ## Freight
//! - `GET|POST /freights/zunka` - Storefront estimate (products or packed package)
//! - `GET|POST /freights/zoom` - Marketplace estimate (catalog references)
//!
//! ## Rate tables
//! - `GET|POST /freights/{region,courier,dealer}` - List or create rows
//! - `GET|PUT|DELETE /freights/{region,courier,dealer}/{id}` - Manage one row
//!
//! ## Health
//! - `GET /health` - Liveness

use crate::api::middleware::auth::{ApiAccess, AuthenticatedUser};
use crate::application::error::ApplicationError;
use crate::application::services::{MarketplaceResponse, StorefrontOffer};
use crate::application::use_cases::{EstimateFreightUseCase, PackedShipment};
use crate::domain::entities::{
    CourierRate, DealerRate, NewCourierRate, NewDealerRate, NewRegionRate, ProductLineItem, RegionRate,
};
use crate::domain::value_objects::{PostalCode, Price, Region};
use crate::infrastructure::catalog::ProductRef;
use crate::infrastructure::persistence::{
    CourierRateRepository, DealerRateRepository, RegionRateRepository,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for REST handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Freight estimation.
    pub estimate: Arc<EstimateFreightUseCase>,
    /// Regional rate table.
    pub region_rates: Arc<dyn RegionRateRepository>,
    /// Local courier rate table.
    pub courier_rates: Arc<dyn CourierRateRepository>,
    /// Dealer rate table.
    pub dealer_rates: Arc<dyn DealerRateRepository>,
    /// Basic-auth rules per route group.
    pub access: ApiAccess,
}

// ============================================================================
// Error Response
// ============================================================================

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Creates a new error response.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error response with details.
    #[must_use]
    pub fn with_details(code: impl Into<String>, message: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Handler error: status plus JSON body.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<ApplicationError> for (StatusCode, Json<ErrorResponse>) {
    fn from(err: ApplicationError) -> Self {
        let (status, code) = match &err {
            ApplicationError::Domain(_) | ApplicationError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            ApplicationError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApplicationError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApplicationError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApplicationError::BadGateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            ApplicationError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        (status, Json(ErrorResponse::new(code, err.to_string())))
    }
}

fn api_error(err: ApplicationError) -> ApiError {
    if err.is_client_error() {
        warn!(error = %err, "request rejected");
    } else {
        error!(error = %err, "request failed");
    }
    err.into()
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(error = %rejection, "malformed request body");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::with_details(
                "VALIDATION_ERROR",
                "malformed request body",
                serde_json::json!({ "reason": rejection.body_text() }),
            )),
        )
    })
}

fn postal_code(field: &str, value: &str) -> ApiResult<PostalCode> {
    PostalCode::parse(value).map_err(|e| {
        warn!(field, value, error = %e, "invalid postal code");
        ApplicationError::validation(format!("invalid {field}: {e}")).into()
    })
}

// ============================================================================
// Freight Types
// ============================================================================

/// Storefront request: a product list or an already packed package.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StorefrontRequest {
    /// Products to plan into legs.
    Products(ProductsRequest),
    /// A packed package, shipped directly.
    Package(PackageRequest),
}

/// Products to quote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsRequest {
    /// Destination postal code.
    pub cep_destiny: String,
    /// Products.
    pub products: Vec<ProductDto>,
}

/// One ordered product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Product identifier.
    pub id: String,
    /// Supplying dealer.
    #[serde(default)]
    pub dealer: String,
    /// Dealer stock location.
    #[serde(default)]
    pub stock_location: String,
    /// Length, cm.
    pub length: u32,
    /// Width, cm.
    pub width: u32,
    /// Height, cm.
    pub height: u32,
    /// Weight, g.
    pub weight: u32,
    /// Unit price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Ordered amount.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl ProductDto {
    fn into_line_item(self) -> Result<ProductLineItem, ApplicationError> {
        let price = Price::from_decimal(self.price)?;
        Ok(
            ProductLineItem::new(self.id, (self.length, self.width, self.height), self.weight, price)
                .with_dealer(self.dealer, self.stock_location)
                .with_quantity(self.quantity),
        )
    }
}

/// A packed package.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    /// Origin override.
    #[serde(default)]
    pub cep_origin: Option<String>,
    /// Destination postal code.
    pub cep_destiny: String,
    /// Length, cm.
    pub length: u32,
    /// Width, cm.
    pub width: u32,
    /// Height, cm.
    pub height: u32,
    /// Weight, g.
    pub weight: u32,
    /// Supplying dealer.
    #[serde(default)]
    pub dealer: Option<String>,
}

/// Marketplace request.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceRequest {
    /// Destination postal code.
    pub zipcode: String,
    /// Catalog references.
    pub items: Vec<MarketplaceItem>,
}

/// One marketplace item.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceItem {
    /// Catalog product identifier.
    pub sku: String,
    /// Ordered amount.
    pub amount: u32,
}

// ============================================================================
// Freight Handlers
// ============================================================================

/// Storefront freight estimate.
#[instrument(skip(state, payload))]
pub async fn storefront_freight(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<StorefrontRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<StorefrontOffer>>> {
    let offers = match body(payload)? {
        StorefrontRequest::Products(request) => {
            info!(%user, products = request.products.len(), "storefront estimate by products");
            let destination = postal_code("cepDestiny", &request.cep_destiny)?;
            let items = request
                .products
                .into_iter()
                .map(ProductDto::into_line_item)
                .collect::<Result<Vec<_>, _>>()
                .map_err(api_error)?;
            state.estimate.estimate_products(&items, destination).await
        }
        StorefrontRequest::Package(request) => {
            info!(%user, "storefront estimate by package");
            let origin = request
                .cep_origin
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(|c| postal_code("cepOrigin", c))
                .transpose()?;
            let shipment = PackedShipment {
                origin,
                destination: postal_code("cepDestiny", &request.cep_destiny)?,
                dimensions_cm: (request.length, request.width, request.height),
                weight_g: request.weight,
                dealer: request.dealer,
            };
            state.estimate.estimate_package(shipment).await
        }
    };

    offers.map(Json).map_err(api_error)
}

/// Marketplace freight estimate.
#[instrument(skip(state, payload))]
pub async fn marketplace_freight(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user): AuthenticatedUser,
    payload: Result<Json<MarketplaceRequest>, JsonRejection>,
) -> ApiResult<Json<MarketplaceResponse>> {
    let request = body(payload)?;
    info!(%user, items = request.items.len(), "marketplace estimate");

    let destination = postal_code("zipcode", &request.zipcode)?;
    let refs: Vec<ProductRef> = request
        .items
        .into_iter()
        .map(|item| ProductRef {
            id: item.sku,
            quantity: item.amount,
        })
        .collect();

    state
        .estimate
        .estimate_marketplace(&refs, destination)
        .await
        .map(Json)
        .map_err(api_error)
}

// ============================================================================
// Rate Table Types
// ============================================================================

/// Region rate payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRateBody {
    /// Region.
    pub region: Region,
    /// Bracket weight, g.
    pub weight: u32,
    /// Deadline, days.
    pub deadline: u32,
    /// Price in cents.
    pub price: i64,
}

impl From<RegionRateBody> for NewRegionRate {
    fn from(body: RegionRateBody) -> Self {
        Self {
            region: body.region,
            weight_g: body.weight,
            deadline_days: body.deadline,
            price_cents: body.price,
        }
    }
}

/// Region rate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRateResponse {
    /// Row id.
    pub id: i64,
    /// Region.
    pub region: Region,
    /// Bracket weight, g.
    pub weight: u32,
    /// Deadline, days.
    pub deadline: u32,
    /// Price in cents.
    pub price: i64,
}

impl From<RegionRate> for RegionRateResponse {
    fn from(rate: RegionRate) -> Self {
        Self {
            id: rate.id,
            region: rate.region,
            weight: rate.weight_g,
            deadline: rate.deadline_days,
            price: rate.price_cents,
        }
    }
}

/// Courier rate payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierRateBody {
    /// Two-letter state code.
    pub state: String,
    /// City name.
    pub city: String,
    /// Deadline, days.
    pub deadline: u32,
    /// Price in cents.
    pub price: i64,
}

impl From<CourierRateBody> for NewCourierRate {
    fn from(body: CourierRateBody) -> Self {
        Self {
            state: body.state,
            city: body.city,
            deadline_days: body.deadline,
            price_cents: body.price,
        }
    }
}

/// Courier rate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierRateResponse {
    /// Row id.
    pub id: i64,
    /// State code.
    pub state: String,
    /// City name.
    pub city: String,
    /// Deadline, days.
    pub deadline: u32,
    /// Price in cents.
    pub price: i64,
}

impl From<CourierRate> for CourierRateResponse {
    fn from(rate: CourierRate) -> Self {
        Self {
            id: rate.id,
            state: rate.state,
            city: rate.city,
            deadline: rate.deadline_days,
            price: rate.price_cents,
        }
    }
}

/// Dealer rate payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerRateBody {
    /// Dealer name.
    pub dealer: String,
    /// Bracket weight, g.
    pub weight: u32,
    /// Deadline, days.
    pub deadline: u32,
    /// Price in cents.
    pub price: i64,
}

impl From<DealerRateBody> for NewDealerRate {
    fn from(body: DealerRateBody) -> Self {
        Self {
            dealer: body.dealer,
            weight_g: body.weight,
            deadline_days: body.deadline,
            price_cents: body.price,
        }
    }
}

/// Dealer rate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealerRateResponse {
    /// Row id.
    pub id: i64,
    /// Dealer name, lowercase.
    pub dealer: String,
    /// Bracket weight, g.
    pub weight: u32,
    /// Deadline, days.
    pub deadline: u32,
    /// Price in cents.
    pub price: i64,
}

impl From<DealerRate> for DealerRateResponse {
    fn from(rate: DealerRate) -> Self {
        Self {
            id: rate.id,
            dealer: rate.dealer,
            weight: rate.weight_g,
            deadline: rate.deadline_days,
            price: rate.price_cents,
        }
    }
}

// ============================================================================
// Region Rate Handlers
// ============================================================================

/// Lists region rates.
#[instrument(skip(state))]
pub async fn list_region_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<RegionRateResponse>>> {
    let rates = state.region_rates.get_all().await.map_err(|e| api_error(e.into()))?;
    Ok(Json(rates.into_iter().map(Into::into).collect()))
}

/// Creates a region rate.
#[instrument(skip(state, payload))]
pub async fn create_region_rate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegionRateBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegionRateResponse>)> {
    let rate: NewRegionRate = body(payload)?.into();
    rate.validate().map_err(|e| api_error(e.into()))?;
    info!(key = %rate.business_key(), "creating region rate");

    let created = state
        .region_rates
        .create(&rate)
        .await
        .map_err(|e| api_error(e.into()))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Gets a region rate.
#[instrument(skip(state))]
pub async fn get_region_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RegionRateResponse>> {
    let rate = state
        .region_rates
        .get(id)
        .await
        .map_err(|e| api_error(e.into()))?
        .ok_or_else(|| api_error(ApplicationError::not_found("RegionRate", id)))?;
    Ok(Json(rate.into()))
}

/// Replaces a region rate.
#[instrument(skip(state, payload))]
pub async fn update_region_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<RegionRateBody>, JsonRejection>,
) -> ApiResult<Json<RegionRateResponse>> {
    let rate: NewRegionRate = body(payload)?.into();
    rate.validate().map_err(|e| api_error(e.into()))?;

    let updated = state
        .region_rates
        .update(id, &rate)
        .await
        .map_err(|e| api_error(e.into()))?
        .ok_or_else(|| api_error(ApplicationError::not_found("RegionRate", id)))?;
    Ok(Json(updated.into()))
}

/// Deletes a region rate.
#[instrument(skip(state))]
pub async fn delete_region_rate(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let deleted = state
        .region_rates
        .delete(id)
        .await
        .map_err(|e| api_error(e.into()))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(ApplicationError::not_found("RegionRate", id)))
    }
}

// ============================================================================
// Courier Rate Handlers
// ============================================================================

/// Lists courier rates.
#[instrument(skip(state))]
pub async fn list_courier_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<CourierRateResponse>>> {
    let rates = state.courier_rates.get_all().await.map_err(|e| api_error(e.into()))?;
    Ok(Json(rates.into_iter().map(Into::into).collect()))
}

/// Creates a courier rate.
#[instrument(skip(state, payload))]
pub async fn create_courier_rate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CourierRateBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CourierRateResponse>)> {
    let rate: NewCourierRate = body(payload)?.into();
    rate.validate().map_err(|e| api_error(e.into()))?;
    info!(key = %rate.business_key(), "creating courier rate");

    let created = state
        .courier_rates
        .create(&rate)
        .await
        .map_err(|e| api_error(e.into()))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Gets a courier rate.
#[instrument(skip(state))]
pub async fn get_courier_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CourierRateResponse>> {
    let rate = state
        .courier_rates
        .get(id)
        .await
        .map_err(|e| api_error(e.into()))?
        .ok_or_else(|| api_error(ApplicationError::not_found("CourierRate", id)))?;
    Ok(Json(rate.into()))
}

/// Replaces a courier rate.
#[instrument(skip(state, payload))]
pub async fn update_courier_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<CourierRateBody>, JsonRejection>,
) -> ApiResult<Json<CourierRateResponse>> {
    let rate: NewCourierRate = body(payload)?.into();
    rate.validate().map_err(|e| api_error(e.into()))?;

    let updated = state
        .courier_rates
        .update(id, &rate)
        .await
        .map_err(|e| api_error(e.into()))?
        .ok_or_else(|| api_error(ApplicationError::not_found("CourierRate", id)))?;
    Ok(Json(updated.into()))
}

/// Deletes a courier rate.
#[instrument(skip(state))]
pub async fn delete_courier_rate(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let deleted = state
        .courier_rates
        .delete(id)
        .await
        .map_err(|e| api_error(e.into()))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(ApplicationError::not_found("CourierRate", id)))
    }
}

// ============================================================================
// Dealer Rate Handlers
// ============================================================================

/// Lists dealer rates.
#[instrument(skip(state))]
pub async fn list_dealer_rates(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<DealerRateResponse>>> {
    let rates = state.dealer_rates.get_all().await.map_err(|e| api_error(e.into()))?;
    Ok(Json(rates.into_iter().map(Into::into).collect()))
}

/// Creates a dealer rate.
#[instrument(skip(state, payload))]
pub async fn create_dealer_rate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DealerRateBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DealerRateResponse>)> {
    let rate: NewDealerRate = body(payload)?.into();
    rate.validate().map_err(|e| api_error(e.into()))?;
    info!(key = %rate.business_key(), "creating dealer rate");

    let created = state
        .dealer_rates
        .create(&rate)
        .await
        .map_err(|e| api_error(e.into()))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Gets a dealer rate.
#[instrument(skip(state))]
pub async fn get_dealer_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DealerRateResponse>> {
    let rate = state
        .dealer_rates
        .get(id)
        .await
        .map_err(|e| api_error(e.into()))?
        .ok_or_else(|| api_error(ApplicationError::not_found("DealerRate", id)))?;
    Ok(Json(rate.into()))
}

/// Replaces a dealer rate.
#[instrument(skip(state, payload))]
pub async fn update_dealer_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    payload: Result<Json<DealerRateBody>, JsonRejection>,
) -> ApiResult<Json<DealerRateResponse>> {
    let rate: NewDealerRate = body(payload)?.into();
    rate.validate().map_err(|e| api_error(e.into()))?;

    let updated = state
        .dealer_rates
        .update(id, &rate)
        .await
        .map_err(|e| api_error(e.into()))?
        .ok_or_else(|| api_error(ApplicationError::not_found("DealerRate", id)))?;
    Ok(Json(updated.into()))
}

/// Deletes a dealer rate.
#[instrument(skip(state))]
pub async fn delete_dealer_rate(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    let deleted = state
        .dealer_rates
        .delete(id)
        .await
        .map_err(|e| api_error(e.into()))?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(ApplicationError::not_found("DealerRate", id)))
    }
}

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Health check handler.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;

    #[test]
    fn error_mapping() {
        let cases = [
            (ApplicationError::from(DomainError::invalid_package("weight", 0)), StatusCode::BAD_REQUEST),
            (ApplicationError::validation("bad cep"), StatusCode::BAD_REQUEST),
            (ApplicationError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApplicationError::not_found("RegionRate", 7), StatusCode::NOT_FOUND),
            (ApplicationError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ApplicationError::BadGateway("down".into()), StatusCode::BAD_GATEWAY),
            (ApplicationError::Repository("db".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let (got, _) = <(StatusCode, Json<ErrorResponse>)>::from(err);
            assert_eq!(got, status);
        }
    }

    #[test]
    fn storefront_request_shapes() {
        let products: StorefrontRequest = serde_json::from_value(serde_json::json!({
            "cepDestiny": "01310-100",
            "products": [{
                "id": "p1", "dealer": "Aldo", "length": 20, "width": 10,
                "height": 5, "weight": 800, "price": 99.9, "quantity": 2
            }]
        }))
        .unwrap();
        assert!(matches!(products, StorefrontRequest::Products(ref r) if r.products[0].quantity == 2));

        let package: StorefrontRequest = serde_json::from_value(serde_json::json!({
            "cepDestiny": "01310100", "length": 30, "width": 20, "height": 10, "weight": 1500
        }))
        .unwrap();
        assert!(matches!(package, StorefrontRequest::Package(ref r) if r.cep_origin.is_none()));
    }

    #[test]
    fn product_dto_defaults_quantity_to_one() {
        let dto: ProductDto = serde_json::from_value(serde_json::json!({
            "id": "p1", "length": 20, "width": 10, "height": 5, "weight": 800, "price": 10
        }))
        .unwrap();
        let item = dto.into_line_item().unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.dealer.is_empty());
    }

    #[test]
    fn rate_rows_serialize_with_short_names() {
        let json = serde_json::to_value(RegionRateResponse {
            id: 1,
            region: Region::South,
            weight: 1000,
            deadline: 3,
            price: 2590,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "region": "south", "weight": 1000, "deadline": 3, "price": 2590})
        );
    }
}
