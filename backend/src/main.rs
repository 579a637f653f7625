//! Weather-station telemetry proxy - Backend Server
//!
//! Forwards a fixed set of signed requests to the station telemetry API and
//! serves reference evapotranspiration (ET0) estimates derived from them.

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use shared::{validate_station_id, StationDirectory};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use crate::error::{AppError, AppResult};
use crate::services::{Et0Service, TelemetryGateway};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: TelemetryGateway,
    pub stations: Arc<StationDirectory>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let stations = config.stations.directory()?;
        let gateway = TelemetryGateway::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            gateway,
            stations: Arc::new(stations),
        })
    }

    pub fn et0_service(&self) -> Et0Service {
        Et0Service::new(self.gateway.clone(), self.stations.clone())
    }

    /// Requested station identifier, or the configured default when absent
    pub fn resolve_station_id(&self, requested: Option<&str>) -> AppResult<String> {
        let station_id = match requested.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.stations.default_station().id.clone(),
        };
        validate_station_id(&station_id)
            .map_err(|reason| AppError::invalid_field("station_id", reason))?;
        Ok(station_id)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "estacao_server=debug,shared=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting weather-station proxy");
    tracing::info!("Environment: {}", config.environment);

    let state = AppState::new(config.clone())?;
    if state.gateway.is_configured() {
        tracing::info!("Telemetry API at {}", config.upstream.base_url);
    } else {
        tracing::warn!("Telemetry API credentials missing; ET0 will use seasonal estimates");
    }
    tracing::info!("{} station(s) configured", state.stations.len());

    spawn_cache_pruner(state.clone(), Duration::from_secs(config.cache.ttl_secs.max(1)));

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop expired cache entries
fn spawn_cache_pruner(state: AppState, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = state.gateway.cache().prune_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "Pruned expired cache entries");
            }
        }
    });
}

/// CORS layer from the configured origin list; "*" allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.allowed_origins);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Weather Station Proxy API v1.0"
}
