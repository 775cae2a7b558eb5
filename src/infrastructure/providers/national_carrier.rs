//! # National Carrier Provider
//!
//! Quotes from the national postal carrier.
//!
//! The provider checks the carrier's physical limits before anything else,
//! then the shared cache, and only then calls the carrier through the
//! [`NationalCarrierClient`] port. [`CorreiosClient`] implements the port
//! over the carrier's form-encoded request / XML reply web service.

use crate::domain::entities::{Package, Quote};
use crate::domain::value_objects::{CarrierKind, Price};
use crate::infrastructure::cache::{self, Cache, keys};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use crate::infrastructure::providers::traits::QuoteProvider;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Carrier label on every national carrier quote.
pub const CARRIER_LABEL: &str = "Correios";

/// Physical limits accepted by the carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarrierLimits {
    /// Smallest accepted side, in cm.
    pub min_dimension_cm: u32,
    /// Largest accepted side, in cm.
    pub max_dimension_cm: u32,
    /// Smallest accepted sum of sides, in cm.
    pub min_dimension_sum_cm: u32,
    /// Largest accepted sum of sides, in cm.
    pub max_dimension_sum_cm: u32,
    /// Smallest accepted weight, in grams.
    pub min_weight_g: u32,
    /// Largest accepted weight, in grams.
    pub max_weight_g: u32,
}

impl Default for CarrierLimits {
    fn default() -> Self {
        Self {
            min_dimension_cm: 1,
            max_dimension_cm: 100,
            min_dimension_sum_cm: 3,
            max_dimension_sum_cm: 200,
            min_weight_g: 1,
            max_weight_g: 50_000,
        }
    }
}

impl CarrierLimits {
    /// Checks a package against the limits.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::OutOfRange` naming the first measure outside
    /// the limits.
    pub fn check(&self, package: &Package) -> ProviderResult<()> {
        let sides = [
            ("length", package.length_cm()),
            ("width", package.width_cm()),
            ("height", package.height_cm()),
        ];
        for (field, value) in sides {
            if !(self.min_dimension_cm..=self.max_dimension_cm).contains(&value) {
                return Err(ProviderError::out_of_range(field, value));
            }
        }

        let sum = package.dimension_sum();
        if !(self.min_dimension_sum_cm..=self.max_dimension_sum_cm).contains(&sum) {
            return Err(ProviderError::out_of_range("dimension sum", sum));
        }

        let weight = package.weight_g();
        if !(self.min_weight_g..=self.max_weight_g).contains(&weight) {
            return Err(ProviderError::out_of_range("weight", weight));
        }
        Ok(())
    }
}

/// One priced service line returned by the carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierService {
    /// Service code as returned.
    pub code: String,
    /// Price.
    pub price: Price,
    /// Deadline in days.
    pub deadline_days: u32,
}

/// Port to the national carrier web service.
#[async_trait]
pub trait NationalCarrierClient: Send + Sync + fmt::Debug {
    /// Fetches the priced services for a package, skipping erroneous lines.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` on transport or decoding failure.
    async fn services(&self, package: &Package) -> ProviderResult<Vec<CarrierService>>;
}

/// Describes a carrier service code.
#[must_use]
pub fn service_description(code: &str) -> Option<&'static str> {
    match code.trim().trim_start_matches('0') {
        "4014" | "4553" => Some("SEDEX"),
        "4510" | "4596" => Some("PAC"),
        "40215" => Some("SEDEX 10"),
        "40290" => Some("SEDEX Hoje"),
        _ => None,
    }
}

/// Parses a price in Brazilian notation, such as `1.234,56`.
#[must_use]
pub fn parse_brazilian_price(raw: &str) -> Option<Price> {
    let normalized = raw.trim().replace('.', "").replace(',', ".");
    let value = Decimal::from_str(&normalized).ok()?;
    Price::from_decimal(value).ok()
}

/// Quote provider for the national carrier.
#[derive(Debug, Clone)]
pub struct NationalCarrierProvider {
    client: Arc<dyn NationalCarrierClient>,
    cache: Arc<dyn Cache>,
    limits: CarrierLimits,
    cache_ttl: Duration,
}

impl NationalCarrierProvider {
    /// Creates a provider.
    #[must_use]
    pub fn new(
        client: Arc<dyn NationalCarrierClient>,
        cache: Arc<dyn Cache>,
        limits: CarrierLimits,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            limits,
            cache_ttl,
        }
    }
}

#[async_trait]
impl QuoteProvider for NationalCarrierProvider {
    fn kind(&self) -> CarrierKind {
        CarrierKind::NationalCarrier
    }

    async fn try_quote(&self, package: &Package) -> ProviderResult<Vec<Quote>> {
        self.limits.check(package)?;

        let key = keys::national_quote(package);
        if let Some(quotes) = cache::get_json::<Vec<Quote>>(self.cache.as_ref(), &key).await {
            debug!(%package, "national carrier cache hit");
            return Ok(quotes);
        }

        let quotes: Vec<Quote> = self
            .client
            .services(package)
            .await?
            .into_iter()
            .filter(|s| s.price.is_positive())
            .map(|s| {
                let description = service_description(&s.code).unwrap_or(&s.code).to_string();
                Quote::new(CarrierKind::NationalCarrier, CARRIER_LABEL, s.price, s.deadline_days)
                    .with_service(s.code, description)
            })
            .collect();

        if !quotes.is_empty() {
            cache::set_json(self.cache.as_ref(), &key, &quotes, self.cache_ttl).await;
        }
        Ok(quotes)
    }
}

// ============================================================================
// Correios web service
// ============================================================================

/// Correios price and deadline calculator endpoint.
pub const DEFAULT_CORREIOS_URL: &str =
    "http://ws.correios.com.br/calculador/CalcPrecoPrazo.asmx/CalcPrecoPrazo";

/// Client for the Correios calculator.
#[derive(Debug, Clone)]
pub struct CorreiosClient {
    http: HttpClient,
    url: String,
    company_code: String,
    password: String,
    service_codes: Vec<String>,
}

impl CorreiosClient {
    /// Creates a client.
    #[must_use]
    pub fn new(
        http: HttpClient,
        url: impl Into<String>,
        company_code: impl Into<String>,
        password: impl Into<String>,
        service_codes: Vec<String>,
    ) -> Self {
        Self {
            http,
            url: url.into(),
            company_code: company_code.into(),
            password: password.into(),
            service_codes,
        }
    }

    fn form(&self, package: &Package) -> Vec<(&'static str, String)> {
        let weight_kg = Decimal::new(i64::from(package.weight_g()), 3);
        vec![
            ("nCdEmpresa", self.company_code.clone()),
            ("sDsSenha", self.password.clone()),
            ("nCdServico", self.service_codes.join(",")),
            ("sCepOrigem", package.origin().to_string()),
            ("sCepDestino", package.destination().to_string()),
            ("nVlPeso", weight_kg.to_string()),
            ("nCdFormato", "1".to_string()),
            ("nVlComprimento", package.length_cm().to_string()),
            ("nVlAltura", package.height_cm().to_string()),
            ("nVlLargura", package.width_cm().to_string()),
            ("nVlDiametro", "0".to_string()),
            ("sCdMaoPropria", "N".to_string()),
            ("nVlValorDeclarado", "0".to_string()),
            ("sCdAvisoRecebimento", "N".to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct CorreiosReply {
    #[serde(rename = "Servicos")]
    services: CorreiosServices,
}

#[derive(Debug, Default, Deserialize)]
struct CorreiosServices {
    #[serde(rename = "cServico", default)]
    lines: Vec<CorreiosLine>,
}

#[derive(Debug, Deserialize)]
struct CorreiosLine {
    #[serde(rename = "Codigo")]
    code: String,
    #[serde(rename = "Valor", default)]
    price: String,
    #[serde(rename = "PrazoEntrega", default)]
    deadline: String,
    #[serde(rename = "Erro", default)]
    error: String,
    #[serde(rename = "MsgErro", default)]
    message: String,
}

/// Decodes a calculator reply into priced services.
///
/// # Errors
///
/// Returns `ProviderError::Protocol` if the body is not a calculator reply.
pub fn parse_reply(package: &Package, body: &str) -> ProviderResult<Vec<CarrierService>> {
    let reply: CorreiosReply =
        quick_xml::de::from_str(body).map_err(|e| ProviderError::protocol(e.to_string()))?;

    let services = reply
        .services
        .lines
        .into_iter()
        .filter_map(|line| {
            let error = line.error.trim();
            if !error.is_empty() && error != "0" {
                warn!(
                    origin = %package.origin(),
                    destination = %package.destination(),
                    code = %line.code,
                    error,
                    message = %line.message,
                    "carrier rejected service"
                );
                return None;
            }
            let Some(price) = parse_brazilian_price(&line.price) else {
                warn!(code = %line.code, price = %line.price, "unparseable carrier price");
                return None;
            };
            let Ok(deadline_days) = line.deadline.trim().parse::<u32>() else {
                warn!(code = %line.code, deadline = %line.deadline, "unparseable carrier deadline");
                return None;
            };
            Some(CarrierService {
                code: line.code.trim().to_string(),
                price,
                deadline_days,
            })
        })
        .collect();
    Ok(services)
}

#[async_trait]
impl NationalCarrierClient for CorreiosClient {
    async fn services(&self, package: &Package) -> ProviderResult<Vec<CarrierService>> {
        let body = self.http.post_form(&self.url, &self.form(package)).await?;
        parse_reply(package, &body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PostalCode;
    use crate::infrastructure::cache::InMemoryCache;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<cResultado xmlns="http://tempuri.org/">
  <Servicos>
    <cServico>
      <Codigo>4596</Codigo>
      <Valor>1.234,56</Valor>
      <PrazoEntrega>8</PrazoEntrega>
      <Erro>0</Erro>
      <MsgErro></MsgErro>
    </cServico>
    <cServico>
      <Codigo>4553</Codigo>
      <Valor>45,90</Valor>
      <PrazoEntrega>3</PrazoEntrega>
      <Erro></Erro>
      <MsgErro></MsgErro>
    </cServico>
    <cServico>
      <Codigo>40215</Codigo>
      <Valor>0,00</Valor>
      <PrazoEntrega>0</PrazoEntrega>
      <Erro>008</Erro>
      <MsgErro>Servico indisponivel para o trecho informado.</MsgErro>
    </cServico>
  </Servicos>
</cResultado>"#;

    #[derive(Debug, Default)]
    struct CountingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NationalCarrierClient for CountingClient {
        async fn services(&self, _package: &Package) -> ProviderResult<Vec<CarrierService>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                CarrierService {
                    code: "04510".to_string(),
                    price: Price::from_cents(2350).unwrap(),
                    deadline_days: 6,
                },
                CarrierService {
                    code: "99999".to_string(),
                    price: Price::from_cents(5000).unwrap(),
                    deadline_days: 2,
                },
            ])
        }
    }

    fn package(dims: (u32, u32, u32), weight_g: u32) -> Package {
        Package::new(
            PostalCode::parse("31110700").unwrap(),
            PostalCode::parse("01310100").unwrap(),
            dims,
            weight_g,
        )
        .unwrap()
    }

    fn provider(client: Arc<CountingClient>) -> NationalCarrierProvider {
        NationalCarrierProvider::new(
            client,
            Arc::new(InMemoryCache::new()),
            CarrierLimits::default(),
            Duration::from_secs(7200),
        )
    }

    #[test]
    fn brazilian_prices() {
        assert_eq!(parse_brazilian_price("1.234,56").unwrap().to_string(), "1234.56");
        assert_eq!(parse_brazilian_price("45,90").unwrap().to_string(), "45.90");
        assert!(parse_brazilian_price("abc").is_none());
    }

    #[test]
    fn descriptions_ignore_leading_zeros() {
        assert_eq!(service_description("04014"), Some("SEDEX"));
        assert_eq!(service_description("4510"), Some("PAC"));
        assert_eq!(service_description("40290"), Some("SEDEX Hoje"));
        assert_eq!(service_description("12345"), None);
    }

    #[test]
    fn limits() {
        let limits = CarrierLimits::default();
        assert!(limits.check(&package((30, 20, 10), 1500)).is_ok());
        assert!(limits.check(&package((101, 20, 10), 1500)).unwrap_err().is_out_of_range());
        assert!(limits.check(&package((100, 90, 20), 1500)).is_err());
        assert!(limits.check(&package((30, 20, 10), 50_001)).is_err());
    }

    #[test]
    fn reply_parsing_skips_erroneous_lines() {
        let services = parse_reply(&package((30, 20, 10), 1500), REPLY).unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].code, "4596");
        assert_eq!(services[0].price.to_string(), "1234.56");
        assert_eq!(services[0].deadline_days, 8);
        assert_eq!(services[1].code, "4553");
    }

    #[test]
    fn garbage_reply_is_a_protocol_error() {
        let err = parse_reply(&package((30, 20, 10), 1500), "<html>").unwrap_err();
        assert!(matches!(err, ProviderError::Protocol(_)));
    }

    #[tokio::test]
    async fn out_of_range_package_makes_no_call() {
        let client = Arc::new(CountingClient::default());
        let set = provider(client.clone()).quote(&package((120, 20, 10), 1500)).await;
        assert!(!set.is_success());
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_identical_call_is_served_from_cache() {
        let client = Arc::new(CountingClient::default());
        let provider = provider(client.clone());

        let first = provider.quote(&package((30, 20, 10), 1500)).await;
        let second = provider.quote(&package((30, 20, 10), 1500)).await;

        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.quotes(), second.quotes());
        assert_eq!(first.quotes()[0].service_description(), "PAC");
        assert_eq!(first.quotes()[1].service_description(), "99999");
        assert!(first.quotes().iter().all(|q| q.carrier() == CARRIER_LABEL));
    }

    #[tokio::test]
    async fn correios_client_posts_form_and_reads_xml() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calc"))
            .and(body_string_contains("sCepOrigem=31110700"))
            .and(body_string_contains("nVlPeso=1.500"))
            .and(body_string_contains("nCdServico=4596%2C4553"))
            .respond_with(ResponseTemplate::new(200).set_body_string(REPLY))
            .expect(1)
            .mount(&server)
            .await;

        let client = CorreiosClient::new(
            HttpClient::new(5000).unwrap(),
            format!("{}/calc", server.uri()),
            "",
            "",
            vec!["4596".to_string(), "4553".to_string()],
        );
        let services = client.services(&package((30, 20, 10), 1500)).await.unwrap();
        assert_eq!(services.len(), 2);
    }
}
