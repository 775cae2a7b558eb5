//! # ViaCEP Adapter
//!
//! [`AddressLookup`] over the ViaCEP JSON web service
//! (`GET {base}/ws/{cep}/json/`).

use super::{Address, AddressLookup, GeoError, GeoResult};
use crate::domain::value_objects::PostalCode;
use crate::infrastructure::http_client::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// Wire format of a ViaCEP answer.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

/// ViaCEP client.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: HttpClient,
    base_url: String,
}

impl ViaCepClient {
    /// Creates a client for `base_url`.
    #[must_use]
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    #[instrument(skip(self), fields(postal_code = %postal_code))]
    async fn lookup(&self, postal_code: &PostalCode) -> GeoResult<Address> {
        let url = format!("{}/ws/{}/json/", self.base_url, postal_code);
        let response: ViaCepResponse = self.http.get(&url).await?;

        if response.erro.is_some() || response.uf.is_empty() {
            return Err(GeoError::NotFound(postal_code.to_string()));
        }

        Ok(Address {
            postal_code: postal_code.clone(),
            street: response.logradouro,
            district: response.bairro,
            city: response.localidade,
            state: response.uf.to_lowercase(),
        })
    }
}
