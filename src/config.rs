//! # Configuration
//!
//! Application configuration loading and management.
//!
//! # Configuration Sources
//!
//! Configuration is loaded in the following order (later sources override earlier):
//! 1. Default values
//! 2. Configuration file (if exists)
//! 3. Environment variables (prefixed with `FREIGHT_`)
//!
//! A `.env` file in the working directory is read into the environment first.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `FREIGHT_CONFIG_FILE` | Configuration file | `config.toml` |
//! | `FREIGHT_REST_HOST` | REST server host | `0.0.0.0` |
//! | `FREIGHT_REST_PORT` | REST server port | `8080` |
//! | `FREIGHT_LOG_LEVEL` | Log level | `info` |
//! | `FREIGHT_LOG_FORMAT` | Log format (json/pretty) | `json` |
//! | `FREIGHT_DATABASE_URL` | PostgreSQL URL | in-memory tables |
//! | `FREIGHT_REDIS_URL` | Redis URL | in-memory cache |
//! | `FREIGHT_WAREHOUSE_POSTAL_CODE` | Warehouse postal code | `31110700` |
//! | `FREIGHT_CARRIER_URL` | Correios calculator URL | public endpoint |
//! | `FREIGHT_CARRIER_COMPANY_CODE` | Correios contract code | empty |
//! | `FREIGHT_CARRIER_PASSWORD` | Correios contract password | empty |
//! | `FREIGHT_CATALOG_URL` | Product catalog base URL | `http://localhost:3080` |
//! | `FREIGHT_CATALOG_USER` | Catalog Basic-auth user | empty |
//! | `FREIGHT_CATALOG_PASSWORD` | Catalog Basic-auth password | empty |

use crate::domain::services::DealerProfile;
use crate::domain::value_objects::PostalCode;
use crate::infrastructure::geo::viacep;
use crate::infrastructure::providers::CarrierLimits;
use crate::infrastructure::providers::national_carrier::DEFAULT_CORREIOS_URL;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse configuration.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Invalid configuration value.
    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

// ============================================================================
// Server Configuration
// ============================================================================

/// REST/HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Server host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_rest_port")]
    pub port: u16,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_rest_port(),
        }
    }
}

impl RestConfig {
    /// Returns the socket address for the REST server.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                field: "rest.host:port".to_string(),
                message: format!("{e}"),
            })
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (structured logging).
    #[default]
    Json,
    /// Pretty format (human-readable).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Json,
        }
    }
}

// ============================================================================
// Storage Configuration
// ============================================================================

/// Database configuration.
///
/// Without a URL the rate tables live in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum connection pool size.
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,

    /// Minimum connection pool size.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds.
    #[serde(default = "default_connection_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle connection timeout in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_pool_size(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connection_timeout(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

/// Cache configuration.
///
/// Without a Redis URL entries live in process memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis URL.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Lifetime of `address:` entries, seconds.
    #[serde(default = "default_address_ttl")]
    pub address_ttl_secs: u64,

    /// Lifetime of `postal-region:` entries, seconds.
    #[serde(default = "default_region_ttl")]
    pub region_ttl_secs: u64,

    /// Lifetime of national carrier quote entries, seconds.
    #[serde(default = "default_quote_ttl")]
    pub quote_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            address_ttl_secs: default_address_ttl(),
            region_ttl_secs: default_region_ttl(),
            quote_ttl_secs: default_quote_ttl(),
        }
    }
}

impl CacheConfig {
    /// Address entry lifetime.
    #[must_use]
    pub fn address_ttl(&self) -> Duration {
        Duration::from_secs(self.address_ttl_secs)
    }

    /// Region entry lifetime.
    #[must_use]
    pub fn region_ttl(&self) -> Duration {
        Duration::from_secs(self.region_ttl_secs)
    }

    /// Quote entry lifetime.
    #[must_use]
    pub fn quote_ttl(&self) -> Duration {
        Duration::from_secs(self.quote_ttl_secs)
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Package limits accepted by the national carrier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CarrierLimitsConfig {
    /// Smallest side, cm.
    pub min_dimension_cm: u32,
    /// Largest side, cm.
    pub max_dimension_cm: u32,
    /// Smallest sum of sides, cm.
    pub min_dimension_sum_cm: u32,
    /// Largest sum of sides, cm.
    pub max_dimension_sum_cm: u32,
    /// Smallest weight, g.
    pub min_weight_g: u32,
    /// Largest weight, g.
    pub max_weight_g: u32,
}

impl Default for CarrierLimitsConfig {
    fn default() -> Self {
        let limits = CarrierLimits::default();
        Self {
            min_dimension_cm: limits.min_dimension_cm,
            max_dimension_cm: limits.max_dimension_cm,
            min_dimension_sum_cm: limits.min_dimension_sum_cm,
            max_dimension_sum_cm: limits.max_dimension_sum_cm,
            min_weight_g: limits.min_weight_g,
            max_weight_g: limits.max_weight_g,
        }
    }
}

impl From<CarrierLimitsConfig> for CarrierLimits {
    fn from(config: CarrierLimitsConfig) -> Self {
        Self {
            min_dimension_cm: config.min_dimension_cm,
            max_dimension_cm: config.max_dimension_cm,
            min_dimension_sum_cm: config.min_dimension_sum_cm,
            max_dimension_sum_cm: config.max_dimension_sum_cm,
            min_weight_g: config.min_weight_g,
            max_weight_g: config.max_weight_g,
        }
    }
}

/// National carrier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierConfig {
    /// Calculator endpoint.
    #[serde(default = "default_carrier_url")]
    pub url: String,

    /// Contract code; empty for public prices.
    #[serde(default)]
    pub company_code: String,

    /// Contract password.
    #[serde(default)]
    pub password: String,

    /// Service codes to quote.
    #[serde(default = "default_service_codes")]
    pub service_codes: Vec<String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_carrier_timeout")]
    pub timeout_ms: u64,

    /// Accepted package limits.
    #[serde(default)]
    pub limits: CarrierLimitsConfig,
}

impl Default for CarrierConfig {
    fn default() -> Self {
        Self {
            url: default_carrier_url(),
            company_code: String::new(),
            password: String::new(),
            service_codes: default_service_codes(),
            timeout_ms: default_carrier_timeout(),
            limits: CarrierLimitsConfig::default(),
        }
    }
}

/// Postal code resolution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Address service base URL.
    #[serde(default = "default_geo_url")]
    pub url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_geo_timeout")]
    pub timeout_ms: u64,

    /// The one state the local courier serves.
    #[serde(default = "default_courier_state")]
    pub courier_state: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            url: default_geo_url(),
            timeout_ms: default_geo_timeout(),
            courier_state: default_courier_state(),
        }
    }
}

/// Product catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog base URL.
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Basic-auth user.
    #[serde(default)]
    pub user: String,

    /// Basic-auth password.
    #[serde(default)]
    pub password: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_catalog_timeout")]
    pub timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            user: String::new(),
            password: String::new(),
            timeout_ms: default_catalog_timeout(),
        }
    }
}

// ============================================================================
// Auth Configuration
// ============================================================================

/// Basic-auth users and per-route allow-lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username to password.
    #[serde(default)]
    pub users: HashMap<String, String>,

    /// Users allowed on the storefront routes.
    #[serde(default)]
    pub storefront: Vec<String>,

    /// Users allowed on the marketplace routes.
    #[serde(default)]
    pub marketplace: Vec<String>,

    /// Users allowed on rate table administration.
    #[serde(default)]
    pub admin: Vec<String>,
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST server configuration.
    #[serde(default)]
    pub rest: RestConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// National carrier configuration.
    #[serde(default)]
    pub carrier: CarrierConfig,

    /// Postal code resolution configuration.
    #[serde(default)]
    pub geo: GeoConfig,

    /// Product catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Warehouse postal code.
    #[serde(default = "default_warehouse")]
    pub warehouse_postal_code: String,

    /// Whether dealer legs are also quoted from the dealer rate table.
    #[serde(default = "default_true")]
    pub dealer_table: bool,

    /// Dealer stock locations.
    #[serde(default)]
    pub dealers: Vec<DealerProfile>,

    /// Authentication.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rest: RestConfig::default(),
            log: LogConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            carrier: CarrierConfig::default(),
            geo: GeoConfig::default(),
            catalog: CatalogConfig::default(),
            warehouse_postal_code: default_warehouse(),
            dealer_table: true,
            dealers: Vec::new(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables and optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let config_path =
            std::env::var("FREIGHT_CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if Path::new(&config_path).exists() {
            config = Self::from_file(&config_path)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        // REST configuration
        if let Ok(host) = std::env::var("FREIGHT_REST_HOST") {
            self.rest.host = host;
        }
        if let Ok(port) = std::env::var("FREIGHT_REST_PORT")
            && let Ok(p) = port.parse()
        {
            self.rest.port = p;
        }

        // Logging configuration
        if let Ok(level) = std::env::var("FREIGHT_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Ok(format) = std::env::var("FREIGHT_LOG_FORMAT") {
            self.log.format = match format.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                _ => LogFormat::Json,
            };
        }

        // Storage
        if let Ok(url) = std::env::var("FREIGHT_DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Ok(url) = std::env::var("FREIGHT_REDIS_URL") {
            self.cache.redis_url = Some(url);
        }

        if let Ok(postal) = std::env::var("FREIGHT_WAREHOUSE_POSTAL_CODE") {
            self.warehouse_postal_code = postal;
        }

        // National carrier
        if let Ok(url) = std::env::var("FREIGHT_CARRIER_URL") {
            self.carrier.url = url;
        }
        if let Ok(code) = std::env::var("FREIGHT_CARRIER_COMPANY_CODE") {
            self.carrier.company_code = code;
        }
        if let Ok(password) = std::env::var("FREIGHT_CARRIER_PASSWORD") {
            self.carrier.password = password;
        }

        // Catalog
        if let Ok(url) = std::env::var("FREIGHT_CATALOG_URL") {
            self.catalog.url = url;
        }
        if let Ok(user) = std::env::var("FREIGHT_CATALOG_USER") {
            self.catalog.user = user;
        }
        if let Ok(password) = std::env::var("FREIGHT_CATALOG_PASSWORD") {
            self.catalog.password = password;
        }
    }

    /// Parsed warehouse postal code.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if it is not a valid postal code.
    pub fn warehouse(&self) -> Result<PostalCode, ConfigError> {
        PostalCode::parse(&self.warehouse_postal_code).map_err(|e| ConfigError::InvalidValue {
            field: "warehouse_postal_code".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rest.socket_addr()?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log.level".to_string(),
                message: format!(
                    "invalid log level '{}', must be one of: {:?}",
                    self.log.level, valid_levels
                ),
            });
        }

        self.warehouse()?;

        if self.carrier.service_codes.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "carrier.service_codes".to_string(),
                message: "at least one service code is required".to_string(),
            });
        }

        for (field, list) in [
            ("auth.storefront", &self.auth.storefront),
            ("auth.marketplace", &self.auth.marketplace),
            ("auth.admin", &self.auth.admin),
        ] {
            if let Some(user) = list.iter().find(|u| !self.auth.users.contains_key(*u)) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("unknown user '{user}'"),
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Default Value Functions
// ============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_rest_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_address_ttl() -> u64 {
    2 * 60 * 60
}

fn default_region_ttl() -> u64 {
    7 * 24 * 60 * 60
}

fn default_quote_ttl() -> u64 {
    2 * 60 * 60
}

fn default_carrier_url() -> String {
    DEFAULT_CORREIOS_URL.to_string()
}

fn default_service_codes() -> Vec<String> {
    vec!["04014".to_string(), "04510".to_string()]
}

fn default_carrier_timeout() -> u64 {
    10_000
}

fn default_geo_url() -> String {
    viacep::DEFAULT_BASE_URL.to_string()
}

fn default_geo_timeout() -> u64 {
    5_000
}

fn default_courier_state() -> String {
    "mg".to_string()
}

fn default_catalog_url() -> String {
    "http://localhost:3080".to_string()
}

fn default_catalog_timeout() -> u64 {
    5_000
}

fn default_warehouse() -> String {
    "31110700".to_string()
}
