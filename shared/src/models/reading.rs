//! Raw station readings as delivered by the telemetry gateway

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names accepted for air temperature (°C)
pub const TEMPERATURE_FIELDS: &[&str] = &["temp", "temp_out", "temperature", "air_temp"];
/// Field names accepted for relative humidity (%)
pub const HUMIDITY_FIELDS: &[&str] = &["hum", "hum_out", "humidity", "rh"];
/// Field names accepted for solar radiation (W/m² or MJ/m²/day)
pub const SOLAR_RADIATION_FIELDS: &[&str] = &["solar_rad", "solar_radiation", "radiation"];
/// Field names accepted for wind speed (m/s)
pub const WIND_SPEED_FIELDS: &[&str] = &[
    "wind_speed",
    "wind_speed_avg",
    "wind_speed_last",
    "wind_speed_avg_last_10_min",
];
/// Field names carrying an ET value computed by the station itself (mm/day)
pub const STATION_ET_FIELDS: &[&str] = &["et_day", "et0"];
/// Field names carrying a Unix timestamp in seconds
pub const TIMESTAMP_FIELDS: &[&str] = &["ts", "timestamp"];

/// A single timestamped station record. Every quantity is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeteorologicalReading {
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature_celsius: Option<f64>,
    pub humidity_percent: Option<f64>,
    /// Unit depends on the station firmware, see `normalize_solar_radiation`
    pub solar_radiation: Option<f64>,
    pub wind_speed_mps: Option<f64>,
    pub station_et0_mm: Option<f64>,
}

impl MeteorologicalReading {
    /// Build a reading from one upstream JSON record, matching field aliases.
    pub fn from_record(record: &Map<String, Value>) -> Self {
        let timestamp = TIMESTAMP_FIELDS
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_i64))
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Self {
            timestamp,
            temperature_celsius: numeric_field(record, TEMPERATURE_FIELDS),
            humidity_percent: numeric_field(record, HUMIDITY_FIELDS),
            solar_radiation: numeric_field(record, SOLAR_RADIATION_FIELDS),
            wind_speed_mps: numeric_field(record, WIND_SPEED_FIELDS),
            station_et0_mm: numeric_field(record, STATION_ET_FIELDS),
        }
    }

    /// True when at least one meteorological quantity is present
    pub fn has_measurements(&self) -> bool {
        self.temperature_celsius.is_some()
            || self.humidity_percent.is_some()
            || self.solar_radiation.is_some()
            || self.wind_speed_mps.is_some()
    }
}

fn numeric_field(record: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(as_finite_number))
}

/// Interpret a JSON value as a finite number. Numeric strings are accepted.
pub fn as_finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}
