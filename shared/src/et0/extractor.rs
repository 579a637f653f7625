//! Reduce a series of readings to per-period aggregates

use serde_json::Value;

use crate::models::{AggregatedParameters, MeteorologicalReading};

/// Running statistics for one quantity
#[derive(Debug, Default)]
struct Series {
    sum: f64,
    count: usize,
    max: Option<f64>,
    min: Option<f64>,
}

impl Series {
    fn push(&mut self, value: Option<f64>) {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return;
        };
        self.sum += value;
        self.count += 1;
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Aggregate readings into mean/extreme parameters.
///
/// Order of the readings does not matter. A quantity that no reading carries
/// stays `None` in the output.
pub fn extract_parameters(readings: &[MeteorologicalReading]) -> AggregatedParameters {
    let mut temperature = Series::default();
    let mut humidity = Series::default();
    let mut radiation = Series::default();
    let mut wind = Series::default();

    for reading in readings {
        temperature.push(reading.temperature_celsius);
        humidity.push(reading.humidity_percent);
        radiation.push(reading.solar_radiation);
        wind.push(reading.wind_speed_mps);
    }

    AggregatedParameters {
        temp_mean: temperature.mean(),
        temp_max: temperature.max,
        temp_min: temperature.min,
        humidity_mean: humidity.mean(),
        humidity_max: humidity.max,
        humidity_min: humidity.min,
        solar_radiation: radiation.mean(),
        wind_speed: wind.mean(),
    }
}

/// Aggregate an untyped JSON payload expected to be an array of records.
///
/// Anything other than an array yields all-absent parameters so the selector
/// can still degrade gracefully. Non-object array items are ignored.
pub fn extract_from_json(payload: &Value) -> AggregatedParameters {
    let Some(records) = payload.as_array() else {
        return AggregatedParameters::default();
    };
    let readings: Vec<MeteorologicalReading> = records
        .iter()
        .filter_map(Value::as_object)
        .map(MeteorologicalReading::from_record)
        .collect();
    extract_parameters(&readings)
}

/// Mean of the ET values the station reported itself, if any
pub fn station_reported_et0(readings: &[MeteorologicalReading]) -> Option<f64> {
    let mut series = Series::default();
    for reading in readings {
        series.push(reading.station_et0_mm);
    }
    series.mean()
}
