//! # Product Catalog
//!
//! Resolves product references into line items for the marketplace channel.
//!
//! [`ProductCatalog`] is the port; [`HttpProductCatalog`] asks the
//! storefront's product-info endpoint, authenticating with HTTP Basic.

use crate::domain::entities::ProductLineItem;
use crate::domain::value_objects::Price;
use crate::infrastructure::http_client::{BasicCredentials, HttpClient, HttpError};
use async_trait::async_trait;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for catalog lookups.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Some requested products do not exist.
    #[error("some of the products were not found: requested {requested}, found {found}")]
    NotFound {
        /// Products requested.
        requested: usize,
        /// Products returned.
        found: usize,
    },

    /// The catalog rejected the request.
    #[error("catalog rejected request: {0}")]
    BadRequest(String),

    /// A returned product is unusable.
    #[error("invalid catalog product: {0}")]
    InvalidProduct(String),

    /// Transport failure.
    #[error(transparent)]
    Http(HttpError),
}

impl From<HttpError> for CatalogError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::BadRequest(body) => Self::BadRequest(body),
            other => Self::Http(other),
        }
    }
}

/// Result type for catalog lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A product reference with the ordered amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    /// Product identifier.
    pub id: String,
    /// Ordered amount.
    pub quantity: u32,
}

/// Port to the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync + fmt::Debug {
    /// Resolves every reference into a line item carrying its quantity.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if any reference is unknown,
    /// `CatalogError::BadRequest` if the catalog rejects the request, or a
    /// transport error.
    async fn resolve(&self, refs: &[ProductRef]) -> CatalogResult<Vec<ProductLineItem>>;
}

#[derive(Debug, Serialize)]
struct ProductInfoRequest<'a> {
    #[serde(rename = "productsId")]
    products_id: Vec<&'a str>,
}

/// Product record returned by the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogProduct {
    #[serde(default, alias = "_id")]
    id: String,
    #[serde(default)]
    dealer: String,
    #[serde(default)]
    stock_location: String,
    length: u32,
    width: u32,
    height: u32,
    weight: u32,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
}

impl CatalogProduct {
    fn into_line_item(self, quantity: u32) -> CatalogResult<ProductLineItem> {
        let price = Price::from_decimal(self.price)
            .map_err(|e| CatalogError::InvalidProduct(format!("{}: {e}", self.id)))?;
        Ok(
            ProductLineItem::new(self.id, (self.length, self.width, self.height), self.weight, price)
                .with_dealer(self.dealer, self.stock_location)
                .with_quantity(quantity),
        )
    }
}

/// Catalog client over the storefront product-info endpoint.
#[derive(Debug, Clone)]
pub struct HttpProductCatalog {
    http: HttpClient,
    url: String,
    credentials: BasicCredentials,
}

impl HttpProductCatalog {
    /// Creates a client for `base_url`.
    #[must_use]
    pub fn new(http: HttpClient, base_url: &str, credentials: BasicCredentials) -> Self {
        Self {
            http,
            url: format!("{}/setup/product-info", base_url.trim_end_matches('/')),
            credentials,
        }
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn resolve(&self, refs: &[ProductRef]) -> CatalogResult<Vec<ProductLineItem>> {
        let request = ProductInfoRequest {
            products_id: refs.iter().map(|r| r.id.as_str()).collect(),
        };
        let products: Vec<CatalogProduct> = self
            .http
            .send_json(Method::GET, &self.url, &request, Some(&self.credentials))
            .await
            .inspect_err(|e| warn!(error = %e, "product info request failed"))?;
        debug!(requested = refs.len(), found = products.len(), "product info resolved");

        if products.len() != refs.len() {
            return Err(CatalogError::NotFound {
                requested: refs.len(),
                found: products.len(),
            });
        }

        let mut pending: Vec<Option<&ProductRef>> = refs.iter().map(Some).collect();
        products
            .into_iter()
            .enumerate()
            .map(|(i, product)| {
                let quantity = take_ref(&mut pending, &product.id, i).map_or(1, |r| r.quantity);
                product.into_line_item(quantity)
            })
            .collect()
    }
}

/// Takes the first unused reference for `id`, else the unused one at
/// `position`. Each reference is handed out once, so repeated ids keep
/// their own amounts.
fn take_ref<'a>(pending: &mut [Option<&'a ProductRef>], id: &str, position: usize) -> Option<&'a ProductRef> {
    let by_id = pending.iter().position(|r| r.is_some_and(|r| r.id == id));
    by_id
        .or(Some(position))
        .and_then(|i| pending.get_mut(i))
        .and_then(Option::take)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog(server: &MockServer) -> HttpProductCatalog {
        HttpProductCatalog::new(
            HttpClient::new(2000).unwrap(),
            &server.uri(),
            BasicCredentials {
                username: "freight".to_string(),
                password: "secret".to_string(),
            },
        )
    }

    fn refs() -> Vec<ProductRef> {
        vec![
            ProductRef {
                id: "p1".to_string(),
                quantity: 2,
            },
            ProductRef {
                id: "p2".to_string(),
                quantity: 1,
            },
        ]
    }

    #[tokio::test]
    async fn resolves_products_with_quantities() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/setup/product-info"))
            .and(header_exists("authorization"))
            .and(body_json(serde_json::json!({"productsId": ["p1", "p2"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "p1", "dealer": "Aldo", "stockLocation": "", "length": 20, "width": 10, "height": 5, "weight": 800, "price": 150.5},
                {"_id": "p2", "length": 8, "width": 8, "height": 8, "weight": 300, "price": 40}
            ])))
            .mount(&server)
            .await;

        let items = catalog(&server).resolve(&refs()).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].dealer, "Aldo");
        assert_eq!(items[0].unit_price.to_string(), "150.50");
        assert_eq!(items[1].id, "p2");
        assert_eq!(items[1].quantity, 1);
    }

    #[tokio::test]
    async fn missing_products_are_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "p1", "length": 20, "width": 10, "height": 5, "weight": 800, "price": 150}
            ])))
            .mount(&server)
            .await;

        let err = catalog(&server).resolve(&refs()).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { requested: 2, found: 1 }));
    }

    #[tokio::test]
    async fn bad_request_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid product id"))
            .mount(&server)
            .await;

        let err = catalog(&server).resolve(&refs()).await.unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest(ref body) if body == "invalid product id"));
    }

    #[tokio::test]
    async fn repeated_skus_keep_their_own_amounts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "p1", "length": 20, "width": 10, "height": 5, "weight": 800, "price": 150},
                {"id": "p1", "length": 20, "width": 10, "height": 5, "weight": 800, "price": 150}
            ])))
            .mount(&server)
            .await;

        let refs = [
            ProductRef {
                id: "p1".to_string(),
                quantity: 2,
            },
            ProductRef {
                id: "p1".to_string(),
                quantity: 3,
            },
        ];
        let items = catalog(&server).resolve(&refs).await.unwrap();
        let quantities: Vec<u32> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![2, 3]);
    }

    #[test]
    fn unmatched_ids_fall_back_to_position() {
        let refs = refs();
        let mut pending: Vec<Option<&ProductRef>> = refs.iter().map(Some).collect();
        assert_eq!(take_ref(&mut pending, "p2", 0).unwrap().quantity, 1);
        assert_eq!(take_ref(&mut pending, "renamed", 0).unwrap().id, "p1");
        assert!(take_ref(&mut pending, "renamed", 1).is_none());
    }
}
