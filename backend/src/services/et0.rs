//! ET0 estimation for a station's current conditions

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use shared::{
    estimate_et0, extract_parameters, grade_by_parameter_count, seasonal_estimate,
    station_reported_et0, AggregatedParameters, Et0Method, Et0Result, Et0Source, GpsCoordinates,
    MeteorologicalReading, Precision, StationDirectory, StationInfo, UsedParameters,
};

use crate::services::gateway::TelemetryGateway;

/// Response envelope of the ET0 action
#[derive(Debug, Clone, Serialize)]
pub struct Et0Response {
    pub station_id: String,
    pub station_name: String,
    /// False when the identifier is not in the station table and the
    /// default station's metadata was used
    pub known_station: bool,
    pub coordinates: GpsCoordinates,
    pub day_of_year: u32,
    pub et0: Et0Result,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_reported: Option<Et0Result>,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Et0Service {
    gateway: TelemetryGateway,
    stations: Arc<StationDirectory>,
}

impl Et0Service {
    pub fn new(gateway: TelemetryGateway, stations: Arc<StationDirectory>) -> Self {
        Self { gateway, stations }
    }

    pub async fn estimate(&self, station_id: &str) -> Et0Response {
        self.estimate_at(station_id, Utc::now()).await
    }

    /// Estimate for `station_id` as of `now`. Never fails: upstream errors
    /// degrade to the seasonal estimate.
    pub async fn estimate_at(&self, station_id: &str, now: DateTime<Utc>) -> Et0Response {
        let station = self.stations.lookup(station_id);
        let day_of_year = station.day_of_year_at(now);

        let (et0, station_reported) = match self.gateway.current_readings(station_id).await {
            Ok(readings) => assemble_estimates(&readings, station, day_of_year),
            Err(e) => {
                let month = station.local_date(now).month();
                tracing::warn!(
                    station_id = %station_id,
                    error = %e,
                    month,
                    "Station data unavailable, using seasonal ET0"
                );
                (seasonal_estimate(month), None)
            }
        };

        Et0Response {
            station_id: station_id.to_string(),
            station_name: station.name.clone(),
            known_station: self.stations.contains(station_id),
            coordinates: station.coordinates(),
            day_of_year,
            et0,
            station_reported,
            calculated_at: now,
        }
    }
}

/// Calculated estimate plus the station's own ET value when it reports one
pub fn assemble_estimates(
    readings: &[MeteorologicalReading],
    station: &StationInfo,
    day_of_year: u32,
) -> (Et0Result, Option<Et0Result>) {
    let params = extract_parameters(readings);
    let calculated = estimate_et0(&params, &station.site(day_of_year));
    let reported = station_reported_et0(readings).map(|value| station_estimate(value, &params));
    (calculated, reported)
}

/// Wrap a station-computed ET value, graded by how much the station measured
pub fn station_estimate(value: f64, params: &AggregatedParameters) -> Et0Result {
    let parameters = UsedParameters::new()
        .with_optional("temp_mean", params.temp_mean, Precision::Temperature)
        .with_optional("humidity", params.humidity_mean, Precision::Humidity)
        .with_optional("solar_radiation", params.solar_radiation, Precision::Radiation)
        .with_optional("wind_speed", params.wind_speed, Precision::Wind);

    Et0Result::new(
        value,
        Et0Method::StationReported,
        grade_by_parameter_count(params.measured_quantities()),
        parameters,
    )
    .with_source(Et0Source::Estacao)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{UpstreamConfig, DEFAULT_SENSITIVE_KEYS};
    use crate::external::{StationApiClient, UpstreamRequest};
    use crate::services::{ResponseCache, Sanitizer};
    use chrono::TimeZone;
    use serde_json::json;
    use shared::{DataQuality, SEASONAL_ESTIMATE_NOTE};
    use std::time::Duration;

    fn service() -> Et0Service {
        let client = StationApiClient::new(&UpstreamConfig {
            base_url: "https://telemetry.example/v2".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_secs: 1,
        })
        .unwrap();
        let gateway = TelemetryGateway::new(
            client,
            ResponseCache::new(Duration::from_secs(60)),
            Sanitizer::new(DEFAULT_SENSITIVE_KEYS.iter()),
        );
        Et0Service::new(gateway, Arc::new(StationDirectory::default()))
    }

    fn july_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 15, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_failure_falls_back_to_seasonal() {
        let response = service().estimate_at("4242", july_noon()).await;

        assert_eq!(response.station_id, "4242");
        assert!(!response.known_station);
        assert_eq!(response.coordinates.latitude, -12.15);
        assert_eq!(response.et0.method, Et0Method::SeasonalEstimate);
        assert_eq!(response.et0.value, 2.5);
        assert_eq!(response.et0.quality, DataQuality::VeryLow);
        assert_eq!(response.et0.note.as_deref(), Some(SEASONAL_ESTIMATE_NOTE));
        assert!(response.station_reported.is_none());
    }

    #[tokio::test]
    async fn test_cached_current_conditions_use_penman_monteith() {
        let service = service();
        let request = UpstreamRequest::Current {
            station_id: "4242".to_string(),
        };
        service
            .gateway
            .cache()
            .insert(
                request.cache_key(),
                json!({"sensors": [{"data": [
                    {"temp": 22.0, "hum": 80.0, "solar_rad": 18.0, "wind_speed": 1.5},
                    {"temp": 30.0, "hum": 50.0, "solar_rad": 22.0, "wind_speed": 2.5, "et_day": 4.12}
                ]}]}),
            )
            .await;

        let response = service.estimate_at("4242", july_noon()).await;
        // 15:00 UTC is 12:00 at UTC-3, still 15 July
        assert_eq!(response.day_of_year, 197);
        assert_eq!(response.et0.method, Et0Method::PenmanMonteith);
        assert_eq!(response.et0.quality, DataQuality::High);
        assert_eq!(response.et0.source, Et0Source::Calculado);
        assert!(response.et0.value > 0.0);

        let reported = response.station_reported.unwrap();
        assert_eq!(reported.value, 4.12);
        assert_eq!(reported.method, Et0Method::StationReported);
        assert_eq!(reported.source, Et0Source::Estacao);
        assert_eq!(reported.quality, DataQuality::High);
    }

    #[test]
    fn test_station_estimate_grading() {
        let params = AggregatedParameters {
            temp_mean: Some(25.0),
            ..Default::default()
        };
        let result = station_estimate(3.456, &params);
        assert_eq!(result.value, 3.46);
        assert_eq!(result.quality, DataQuality::Low);

        let empty = station_estimate(3.0, &AggregatedParameters::default());
        assert_eq!(empty.quality, DataQuality::VeryLow);
        assert!(empty.parameters.is_empty());
    }

    #[test]
    fn test_assemble_without_station_et() {
        let readings: Vec<MeteorologicalReading> = [20.0, 32.0]
            .into_iter()
            .map(|t| MeteorologicalReading {
                temperature_celsius: Some(t),
                ..Default::default()
            })
            .collect();
        let (calculated, reported) = assemble_estimates(&readings, &StationInfo::reference(), 180);
        assert_eq!(calculated.method, Et0Method::HargreavesSamani);
        assert_eq!(calculated.quality, DataQuality::Medium);
        assert!(reported.is_none());
    }

    #[test]
    fn test_assemble_single_snapshot() {
        let readings = [MeteorologicalReading {
            temperature_celsius: Some(28.0),
            humidity_percent: Some(55.0),
            wind_speed_mps: Some(2.0),
            ..Default::default()
        }];
        let (calculated, _) = assemble_estimates(&readings, &StationInfo::reference(), 250);
        assert_eq!(calculated.method, Et0Method::TemperatureOnly);
        assert_eq!(calculated.quality, DataQuality::Low);
        assert!(calculated.value > 0.0);
    }
}
