//! Parameter extraction integration tests
//!
//! Tests for turning station readings into aggregated parameters including:
//! - Field alias matching on raw records
//! - Absent and malformed values
//! - Order independence of the aggregates

use proptest::prelude::*;
use serde_json::json;
use shared::{
    extract_from_json, extract_parameters, grade_by_parameter_count, station_reported_et0,
    DataQuality, MeteorologicalReading,
};

fn reading(temperature: Option<f64>, humidity: Option<f64>) -> MeteorologicalReading {
    MeteorologicalReading {
        temperature_celsius: temperature,
        humidity_percent: humidity,
        ..Default::default()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Means and extremes over a day of readings
    #[test]
    fn test_aggregates() {
        let readings = vec![
            reading(Some(18.0), Some(90.0)),
            reading(Some(30.0), Some(40.0)),
            reading(Some(24.0), None),
        ];
        let params = extract_parameters(&readings);

        assert_eq!(params.temp_mean, Some(24.0));
        assert_eq!(params.temp_max, Some(30.0));
        assert_eq!(params.temp_min, Some(18.0));
        assert_eq!(params.humidity_mean, Some(65.0));
        assert_eq!(params.humidity_max, Some(90.0));
        assert_eq!(params.solar_radiation, None);
        assert_eq!(params.wind_speed, None);
        assert_eq!(params.measured_quantities(), 2);
    }

    /// No readings, no parameters
    #[test]
    fn test_empty_input() {
        let params = extract_parameters(&[]);
        assert!(params.is_empty());
        assert_eq!(params.temperature_extremes(), None);
    }

    /// Aliases, numeric strings and garbage on raw JSON records
    #[test]
    fn test_extract_from_json_aliases() {
        let payload = json!([
            {"ts": 1719831600, "temp_out": 21.0, "hum": "80", "solar_radiation": 15.0},
            {"temperature": 29.0, "rh": 50, "wind_speed_avg": 3.0},
            {"temp": "n/a", "hum": null, "radiation": true},
            "not a record"
        ]);
        let params = extract_from_json(&payload);

        assert_eq!(params.temp_max, Some(29.0));
        assert_eq!(params.temp_min, Some(21.0));
        assert_eq!(params.humidity_mean, Some(65.0));
        assert_eq!(params.solar_radiation, Some(15.0));
        assert_eq!(params.wind_speed, Some(3.0));
    }

    /// Anything but an array yields empty parameters
    #[test]
    fn test_extract_from_json_non_array() {
        assert!(extract_from_json(&json!({"temp": 25.0})).is_empty());
        assert!(extract_from_json(&json!(null)).is_empty());
        assert!(extract_from_json(&json!([])).is_empty());
    }

    /// Record timestamps become UTC instants
    #[test]
    fn test_record_timestamp() {
        let record = json!({"ts": 1700000000, "temp": 20.0});
        let reading = MeteorologicalReading::from_record(record.as_object().unwrap());
        assert_eq!(reading.timestamp.unwrap().timestamp(), 1_700_000_000);
        assert!(reading.has_measurements());

        let record = json!({"et_day": 4.0});
        let reading = MeteorologicalReading::from_record(record.as_object().unwrap());
        assert!(!reading.has_measurements());
        assert_eq!(reading.station_et0_mm, Some(4.0));
    }

    /// Station-reported ET is averaged separately
    #[test]
    fn test_station_reported_et0() {
        let readings = vec![
            MeteorologicalReading {
                station_et0_mm: Some(4.0),
                ..Default::default()
            },
            MeteorologicalReading {
                station_et0_mm: Some(5.0),
                ..Default::default()
            },
            reading(Some(25.0), None),
        ];
        assert_eq!(station_reported_et0(&readings), Some(4.5));
        assert_eq!(station_reported_et0(&[reading(Some(25.0), None)]), None);
    }

    /// Quality by number of measured quantities
    #[test]
    fn test_grade_by_parameter_count() {
        assert_eq!(grade_by_parameter_count(0), DataQuality::VeryLow);
        assert_eq!(grade_by_parameter_count(1), DataQuality::Low);
        assert_eq!(grade_by_parameter_count(2), DataQuality::Medium);
        assert_eq!(grade_by_parameter_count(3), DataQuality::Medium);
        assert_eq!(grade_by_parameter_count(4), DataQuality::High);
        assert_eq!(grade_by_parameter_count(9), DataQuality::High);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Whole-degree temperatures keep sums exact regardless of order
    fn readings_strategy() -> impl Strategy<Value = Vec<MeteorologicalReading>> {
        prop::collection::vec(
            (
                proptest::option::of((-20i32..45).prop_map(f64::from)),
                proptest::option::of((0i32..=100).prop_map(f64::from)),
            )
                .prop_map(|(t, h)| reading(t, h)),
            0..48,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Aggregates do not depend on reading order
        #[test]
        fn prop_order_independent(readings in readings_strategy()) {
            let mut reversed = readings.clone();
            reversed.reverse();
            prop_assert_eq!(extract_parameters(&readings), extract_parameters(&reversed));
        }

        /// min <= mean <= max whenever a quantity is present
        #[test]
        fn prop_mean_within_extremes(readings in readings_strategy()) {
            let params = extract_parameters(&readings);
            if let (Some(mean), Some(max), Some(min)) = (params.temp_mean, params.temp_max, params.temp_min) {
                prop_assert!(min <= mean + 1e-9 && mean <= max + 1e-9);
            } else {
                prop_assert!(params.temp_mean.is_none() && params.temp_max.is_none());
            }
        }
    }
}
