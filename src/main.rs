//! # Freight Quote Service
//!
//! Main entry point for the freight quote service.

use anyhow::Context;
use freight_quote::api::middleware::auth::{ApiAccess, RouteAccess};
use freight_quote::api::rest::{AppState, create_router};
use freight_quote::application::services::{FreightAggregationEngine, QuoteProviders};
use freight_quote::application::use_cases::EstimateFreightUseCase;
use freight_quote::config::{AppConfig, LogConfig, LogFormat};
use freight_quote::domain::services::{DealerDirectory, LegPlanner, ShipmentBuilder};
use freight_quote::infrastructure::cache::{Cache, InMemoryCache, RedisCache};
use freight_quote::infrastructure::catalog::HttpProductCatalog;
use freight_quote::infrastructure::geo::{GeoResolver, ViaCepClient};
use freight_quote::infrastructure::http_client::{BasicCredentials, HttpClient};
use freight_quote::infrastructure::persistence::in_memory::{
    InMemoryCourierRateRepository, InMemoryDealerRateRepository, InMemoryRegionRateRepository,
};
use freight_quote::infrastructure::persistence::postgres::{
    self, PoolSettings, PostgresCourierRateRepository, PostgresDealerRateRepository,
    PostgresRegionRateRepository,
};
use freight_quote::infrastructure::persistence::{
    CourierRateRepository, DealerRateRepository, RegionRateRepository,
};
use freight_quote::infrastructure::providers::{
    CorreiosClient, DealerTableProvider, LocalCourierProvider, NationalCarrierProvider,
    QuoteProvider, RegionalTableProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Repositories {
    region: Arc<dyn RegionRateRepository>,
    courier: Arc<dyn CourierRateRepository>,
    dealer: Arc<dyn DealerRateRepository>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;
    init_tracing(&config.log);

    info!("Starting freight quote service v{}", env!("CARGO_PKG_VERSION"));

    let warehouse = config.warehouse()?;
    let repositories = repositories(&config).await?;
    let cache = cache(&config).await?;

    let geo = GeoResolver::new(
        Arc::new(ViaCepClient::new(
            HttpClient::new(config.geo.timeout_ms)?,
            config.geo.url.clone(),
        )),
        cache.clone(),
        config.cache.address_ttl(),
        config.cache.region_ttl(),
    );

    let correios = CorreiosClient::new(
        HttpClient::new(config.carrier.timeout_ms)?,
        config.carrier.url.clone(),
        config.carrier.company_code.clone(),
        config.carrier.password.clone(),
        config.carrier.service_codes.clone(),
    );

    let dealer_table: Option<Arc<dyn QuoteProvider>> = config
        .dealer_table
        .then(|| Arc::new(DealerTableProvider::new(repositories.dealer.clone())) as Arc<dyn QuoteProvider>);

    let engine = FreightAggregationEngine::new(QuoteProviders {
        national: Arc::new(NationalCarrierProvider::new(
            Arc::new(correios),
            cache.clone(),
            config.carrier.limits.into(),
            config.cache.quote_ttl(),
        )),
        regional: Arc::new(RegionalTableProvider::new(geo.clone(), repositories.region.clone())),
        courier: Arc::new(LocalCourierProvider::new(
            geo,
            repositories.courier.clone(),
            warehouse.clone(),
            config.geo.courier_state.clone(),
        )),
        dealer_table,
    });

    let dealers = Arc::new(DealerDirectory::new(config.dealers.clone()));
    info!(dealers = dealers.len(), warehouse = %warehouse, "dealer directory loaded");

    let catalog = HttpProductCatalog::new(
        HttpClient::new(config.catalog.timeout_ms)?,
        &config.catalog.url,
        BasicCredentials {
            username: config.catalog.user.clone(),
            password: config.catalog.password.clone(),
        },
    );

    let planner = LegPlanner::new(ShipmentBuilder::new(warehouse.clone(), dealers.clone()), dealers.clone());
    let estimate = EstimateFreightUseCase::new(warehouse, planner, dealers, engine, Arc::new(catalog));

    let users = Arc::new(config.auth.users.clone());
    let state = Arc::new(AppState {
        estimate: Arc::new(estimate),
        region_rates: repositories.region,
        courier_rates: repositories.courier,
        dealer_rates: repositories.dealer,
        access: ApiAccess {
            storefront: Arc::new(RouteAccess::new(users.clone(), config.auth.storefront.clone())),
            marketplace: Arc::new(RouteAccess::new(users.clone(), config.auth.marketplace.clone())),
            admin: Arc::new(RouteAccess::new(users, config.auth.admin.clone())),
        },
    });

    let addr = config.rest.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "Freight quote service listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down freight quote service");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

async fn repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    let Some(url) = &config.database.url else {
        warn!("no database configured, rate tables are in memory");
        return Ok(Repositories {
            region: Arc::new(InMemoryRegionRateRepository::new()),
            courier: Arc::new(InMemoryCourierRateRepository::new()),
            dealer: Arc::new(InMemoryDealerRateRepository::new()),
        });
    };

    let pool = postgres::connect(&PoolSettings {
        url: url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        connect_timeout: Duration::from_secs(config.database.connect_timeout_secs),
        idle_timeout: Duration::from_secs(config.database.idle_timeout_secs),
    })
    .await
    .context("connecting to database")?;
    postgres::run_migrations(&pool).await.context("running migrations")?;
    info!("database connected");

    Ok(Repositories {
        region: Arc::new(PostgresRegionRateRepository::new(pool.clone())),
        courier: Arc::new(PostgresCourierRateRepository::new(pool.clone())),
        dealer: Arc::new(PostgresDealerRateRepository::new(pool)),
    })
}

async fn cache(config: &AppConfig) -> anyhow::Result<Arc<dyn Cache>> {
    match &config.cache.redis_url {
        Some(url) => {
            let cache = RedisCache::connect(url).await.context("connecting to redis")?;
            info!("redis cache connected");
            Ok(Arc::new(cache))
        }
        None => {
            warn!("no redis configured, using in-memory cache");
            Ok(Arc::new(InMemoryCache::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
