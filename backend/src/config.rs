//! Configuration management for the station proxy
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/default.toml, config/{environment}.toml)
//! 3. Environment variable overrides with ESTACAO_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{validate_station_info, StationDirectory, StationInfo, REFERENCE_STATION_ID};

/// Keys removed from every upstream payload unless overridden
pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &[
    "api-key",
    "api_key",
    "api-secret",
    "api_secret",
    "api-signature",
    "user_email",
    "username",
    "company_name",
    "gateway_id",
    "gateway_id_hex",
    "product_number",
    "registered_date",
    "subscription_end_date",
    "subscription_type",
];

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Telemetry API configuration
    pub upstream: UpstreamConfig,

    /// Response cache configuration
    pub cache: CacheConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Response sanitization configuration
    pub sanitize: SanitizeConfig,

    /// Station metadata table
    pub stations: StationsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the telemetry API
    pub base_url: String,

    /// API key sent with every request
    pub api_key: String,

    /// Shared secret used to sign requests
    pub api_secret: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// Time-to-live of cached upstream responses in seconds
    pub ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins; "*" allows any origin
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SanitizeConfig {
    /// Object keys stripped from upstream responses
    pub sensitive_keys: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StationsConfig {
    /// Station used for unknown identifiers
    pub default_station: String,

    /// Known stations
    #[serde(default)]
    pub entries: Vec<StationInfo>,
}

impl StationsConfig {
    /// Build the lookup table, rejecting invalid entries
    pub fn directory(&self) -> Result<StationDirectory, ConfigError> {
        for station in &self.entries {
            validate_station_info(station).map_err(|reason| {
                ConfigError::Message(format!("station '{}': {}", station.id, reason))
            })?;
        }
        if self.entries.is_empty() {
            return Ok(StationDirectory::default());
        }
        Ok(StationDirectory::new(
            self.default_station.clone(),
            self.entries.iter().cloned(),
        ))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("ESTACAO_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upstream.base_url", "https://api.weatherlink.com/v2")?
            .set_default("upstream.api_key", "")?
            .set_default("upstream.api_secret", "")?
            .set_default("upstream.timeout_secs", 10)?
            .set_default("cache.ttl_secs", 300)?
            .set_default("cors.allowed_origins", vec!["*"])?
            .set_default("sanitize.sensitive_keys", DEFAULT_SENSITIVE_KEYS.to_vec())?
            .set_default("stations.default_station", REFERENCE_STATION_ID)?
            // Load shared and environment-specific config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ESTACAO_ prefix)
            .add_source(
                Environment::with_prefix("ESTACAO")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .with_list_parse_key("sanitize.sensitive_keys")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
