//! # HTTP Client Utilities
//!
//! Shared HTTP client for outbound adapters.
//!
//! Wraps [`reqwest::Client`] with a fixed timeout and maps transport and
//! status failures into [`HttpError`]. Used by the national carrier,
//! address lookup and product catalog adapters.
//!
//! # Examples
//!
//! ```ignore
//! use freight_quote::infrastructure::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let address: Address = client.get("https://viacep.com.br/ws/01310100/json/").await?;
//! ```

use reqwest::{Client, Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Error type for outbound HTTP calls.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Request timed out.
    #[error("http timeout: {0}")]
    Timeout(String),

    /// Connection or transport failure.
    #[error("http connection error: {0}")]
    Connection(String),

    /// Remote rejected the request as malformed.
    #[error("http bad request: {0}")]
    BadRequest(String),

    /// Remote rejected the credentials.
    #[error("http authentication error: {0}")]
    Authentication(String),

    /// Remote failed with an unexpected status.
    #[error("http status {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Response could not be decoded.
    #[error("http protocol error: {0}")]
    Protocol(String),
}

/// Result type for outbound HTTP calls.
pub type HttpResult<T> = Result<T, HttpError>;

/// Basic-auth credentials for outbound calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// HTTP client wrapper for outbound adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Connection` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> HttpResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| HttpError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` if the request fails or the body is not the
    /// expected JSON.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> HttpResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_json(response).await
    }

    /// Makes a form-encoded POST request and returns the raw body.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` if the request fails or the status is not 2xx.
    pub async fn post_form<F: Serialize + ?Sized>(&self, url: &str, form: &F) -> HttpResult<String> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let response = check_status(response).await?;
        response
            .text()
            .await
            .map_err(|e| HttpError::Protocol(format!("Failed to read response: {}", e)))
    }

    /// Sends a JSON body with any method and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` if the request fails or the body is not the
    /// expected JSON.
    pub async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &B,
        credentials: Option<&BasicCredentials>,
    ) -> HttpResult<T> {
        let mut request = self.client.request(method, url).json(body);
        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        handle_json(response).await
    }
}

async fn handle_json<T: DeserializeOwned>(response: Response) -> HttpResult<T> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| HttpError::Protocol(format!("Failed to parse response: {}", e)))
}

async fn check_status(response: Response) -> HttpResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(map_status_error(status, body))
}

fn map_reqwest_error(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout("Request timed out".to_string())
    } else if error.is_connect() {
        HttpError::Connection(format!("Connection failed: {}", error))
    } else {
        HttpError::Connection(format!("HTTP request failed: {}", error))
    }
}

fn map_status_error(status: StatusCode, body: String) -> HttpError {
    match status {
        StatusCode::BAD_REQUEST => HttpError::BadRequest(body),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HttpError::Authentication(body),
        _ => HttpError::Status {
            status: status.as_u16(),
            body,
        },
    }
}
