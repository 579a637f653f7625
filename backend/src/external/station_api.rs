//! Telemetry API client for weather-station data
//!
//! Every request is signed with `SignedParams`; responses are returned as raw
//! JSON and left to the gateway for sanitizing and caching.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::{AppError, AppResult};
use crate::external::signature::{SignedParams, SIGNATURE_PARAM};

/// Longest window accepted by the historic endpoint, in seconds
pub const MAX_HISTORIC_WINDOW_SECS: i64 = 86_400;

/// The fixed set of upstream endpoints the proxy forwards to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamRequest {
    Stations,
    Sensors,
    Current {
        station_id: String,
    },
    Historic {
        station_id: String,
        start_timestamp: i64,
        end_timestamp: i64,
    },
}

impl UpstreamRequest {
    /// Historic request, validated before any network call
    pub fn historic(
        station_id: impl Into<String>,
        start_timestamp: i64,
        end_timestamp: i64,
    ) -> AppResult<Self> {
        if start_timestamp >= end_timestamp {
            return Err(AppError::Validation {
                field: "start_timestamp".to_string(),
                message: "start_timestamp must be before end_timestamp".to_string(),
                message_pt: "start_timestamp deve ser anterior a end_timestamp".to_string(),
            });
        }
        if end_timestamp - start_timestamp > MAX_HISTORIC_WINDOW_SECS {
            return Err(AppError::Validation {
                field: "end_timestamp".to_string(),
                message: "Historic window must be at most 24 hours".to_string(),
                message_pt: "O intervalo histórico deve ter no máximo 24 horas".to_string(),
            });
        }
        Ok(UpstreamRequest::Historic {
            station_id: station_id.into(),
            start_timestamp,
            end_timestamp,
        })
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            UpstreamRequest::Stations => "/stations".to_string(),
            UpstreamRequest::Sensors => "/sensors".to_string(),
            UpstreamRequest::Current { station_id } => format!("/current/{}", station_id),
            UpstreamRequest::Historic { station_id, .. } => format!("/historic/{}", station_id),
        }
    }

    /// Key identifying this request in the response cache
    pub fn cache_key(&self) -> String {
        match self {
            UpstreamRequest::Stations => "stations".to_string(),
            UpstreamRequest::Sensors => "sensors".to_string(),
            UpstreamRequest::Current { station_id } => format!("current:{}", station_id),
            UpstreamRequest::Historic {
                station_id,
                start_timestamp,
                end_timestamp,
            } => format!(
                "historic:{}:{}:{}",
                station_id, start_timestamp, end_timestamp
            ),
        }
    }

    /// All parameters covered by the signature for this endpoint
    pub fn signed_params(&self, api_key: &str, timestamp: i64) -> SignedParams {
        let params = SignedParams::new(api_key, timestamp);
        match self {
            UpstreamRequest::Stations | UpstreamRequest::Sensors => params,
            UpstreamRequest::Current { station_id } => params.with("station-id", station_id.as_str()),
            UpstreamRequest::Historic {
                station_id,
                start_timestamp,
                end_timestamp,
            } => params
                .with("station-id", station_id.as_str())
                .with("start-timestamp", start_timestamp.to_string())
                .with("end-timestamp", end_timestamp.to_string()),
        }
    }
}

/// Signed HTTP client for the telemetry API
#[derive(Clone)]
pub struct StationApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl StationApiClient {
    /// Create a new client from configuration
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }

    /// Full URL and query pairs (signature included) for a request
    pub fn prepare(
        &self,
        request: &UpstreamRequest,
        timestamp: i64,
    ) -> AppResult<(String, Vec<(String, String)>)> {
        let params = request.signed_params(&self.api_key, timestamp);
        let signature = params.sign(&self.api_secret)?;

        let mut query = params.query_pairs(&["station-id"]);
        query.push((SIGNATURE_PARAM.to_string(), signature));

        Ok((format!("{}{}", self.base_url, request.path()), query))
    }

    /// Perform a signed GET and decode the JSON body
    pub async fn fetch(&self, request: &UpstreamRequest) -> AppResult<Value> {
        if !self.is_configured() {
            return Err(AppError::Configuration(
                "Telemetry API credentials not configured".to_string(),
            ));
        }

        let (url, query) = self.prepare(request, Utc::now().timestamp())?;
        tracing::debug!(path = %request.path(), "Calling telemetry API");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Telemetry request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamStatus { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::UpstreamDecode(format!("Failed to parse telemetry response: {}", e)))
    }
}
