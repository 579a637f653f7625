//! Cached, sanitized access to the telemetry API

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use shared::MeteorologicalReading;

use crate::config::Config;
use crate::error::AppResult;
use crate::external::{StationApiClient, UpstreamRequest};
use crate::services::{ResponseCache, Sanitizer};

/// Single entry point for upstream telemetry
#[derive(Clone)]
pub struct TelemetryGateway {
    client: StationApiClient,
    cache: Arc<ResponseCache>,
    sanitizer: Arc<Sanitizer>,
}

impl TelemetryGateway {
    pub fn new(client: StationApiClient, cache: ResponseCache, sanitizer: Sanitizer) -> Self {
        Self {
            client,
            cache: Arc::new(cache),
            sanitizer: Arc::new(sanitizer),
        }
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = StationApiClient::new(&config.upstream)?;
        let cache = ResponseCache::new(Duration::from_secs(config.cache.ttl_secs));
        let sanitizer = Sanitizer::new(&config.sanitize.sensitive_keys);
        Ok(Self::new(client, cache, sanitizer))
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Sanitized upstream payload, served from cache while fresh
    pub async fn fetch(&self, request: &UpstreamRequest) -> AppResult<Value> {
        let key = request.cache_key();
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(key = %key, "Serving telemetry from cache");
            return Ok(cached);
        }

        let payload = self.client.fetch(request).await?;
        let payload = self.sanitizer.sanitized(payload);
        self.cache.insert(key, payload.clone()).await;
        Ok(payload)
    }

    /// Current conditions for a station as flat readings
    pub async fn current_readings(&self, station_id: &str) -> AppResult<Vec<MeteorologicalReading>> {
        let request = UpstreamRequest::Current {
            station_id: station_id.to_string(),
        };
        let payload = self.fetch(&request).await?;
        Ok(flatten_readings(&payload))
    }
}

/// Flatten `{sensors: [{data: [...]}]}` (or a bare record array) into readings
pub fn flatten_readings(payload: &Value) -> Vec<MeteorologicalReading> {
    let records: Vec<&Value> = match payload {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map
            .get("sensors")
            .and_then(Value::as_array)
            .map(|sensors| {
                sensors
                    .iter()
                    .filter_map(|sensor| sensor.get("data").and_then(Value::as_array))
                    .flatten()
                    .collect()
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    records
        .into_iter()
        .filter_map(Value::as_object)
        .map(MeteorologicalReading::from_record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UpstreamConfig, DEFAULT_SENSITIVE_KEYS};
    use crate::error::AppError;
    use serde_json::json;

    fn offline_gateway() -> TelemetryGateway {
        let client = StationApiClient::new(&UpstreamConfig {
            base_url: "https://telemetry.example/v2".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_secs: 1,
        })
        .unwrap();
        TelemetryGateway::new(
            client,
            ResponseCache::new(Duration::from_secs(60)),
            Sanitizer::new(DEFAULT_SENSITIVE_KEYS.iter()),
        )
    }

    #[test]
    fn test_flatten_sensor_payload() {
        let payload = json!({
            "station_id": 4242,
            "sensors": [
                {"lsid": 1, "data": [{"ts": 1700000000, "temp": 25.0, "hum": 60.0}]},
                {"lsid": 2, "data": [{"solar_rad": 600.0}, {"wind_speed_avg": 2.5}]},
                {"lsid": 3}
            ]
        });
        let readings = flatten_readings(&payload);
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].temperature_celsius, Some(25.0));
        assert_eq!(readings[1].solar_radiation, Some(600.0));
        assert_eq!(readings[2].wind_speed_mps, Some(2.5));
    }

    #[test]
    fn test_flatten_bare_array_and_garbage() {
        let readings = flatten_readings(&json!([{"temperature": "21.5"}, 7]));
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].temperature_celsius, Some(21.5));

        assert!(flatten_readings(&json!("nope")).is_empty());
        assert!(flatten_readings(&json!({"sensors": "nope"})).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_serves_cached_payload_without_credentials() {
        let gateway = offline_gateway();
        let request = UpstreamRequest::Stations;
        gateway
            .cache()
            .insert(request.cache_key(), json!({"stations": [{"station_id": 1}]}))
            .await;

        let payload = gateway.fetch(&request).await.unwrap();
        assert_eq!(payload, json!({"stations": [{"station_id": 1}]}));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let gateway = offline_gateway();
        let result = gateway.fetch(&UpstreamRequest::Sensors).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
        assert_eq!(gateway.cache().len().await, 0);
    }
}
