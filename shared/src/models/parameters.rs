//! Per-period aggregates derived from raw readings

use serde::{Deserialize, Serialize};

/// Aggregated meteorological parameters for one estimation period.
///
/// A field is `None` when no reading carried that quantity. Absence is never
/// encoded as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedParameters {
    pub temp_mean: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub humidity_mean: Option<f64>,
    pub humidity_max: Option<f64>,
    pub humidity_min: Option<f64>,
    pub solar_radiation: Option<f64>,
    pub wind_speed: Option<f64>,
}

impl AggregatedParameters {
    /// Both temperature extremes as `(max, min)`
    pub fn temperature_extremes(&self) -> Option<(f64, f64)> {
        Some((self.temp_max?, self.temp_min?))
    }

    /// Best single temperature for the period: midpoint of the extremes,
    /// else the mean, else whichever extreme exists.
    pub fn representative_temperature(&self) -> Option<f64> {
        match self.temperature_extremes() {
            Some((max, min)) => Some((max + min) / 2.0),
            None => self.temp_mean.or(self.temp_max).or(self.temp_min),
        }
    }

    /// Number of distinct quantities present (temperature, humidity,
    /// radiation, wind), between 0 and 4.
    pub fn measured_quantities(&self) -> usize {
        [
            self.representative_temperature().is_some(),
            self.humidity_mean.is_some(),
            self.solar_radiation.is_some(),
            self.wind_speed.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.measured_quantities() == 0
    }
}
