//! Radiation model integration tests
//!
//! Tests for the FAO-56 radiation and atmosphere helpers including:
//! - Published reference values
//! - Unit normalization of solar radiation readings
//! - Domain errors for impossible inputs

use proptest::prelude::*;
use shared::{
    actual_vapor_pressure, atmospheric_pressure, clear_sky_radiation, extraterrestrial_radiation,
    is_irradiance, net_radiation, normalize_solar_radiation, psychrometric_constant,
    saturation_vapor_pressure, Et0Error, HumidityInput,
};

fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// FAO-56 example 8: 20°S on 3 September
    #[test]
    fn test_extraterrestrial_radiation_reference() {
        let ra = extraterrestrial_radiation(-20.0, 246).unwrap();
        assert!(close(ra, 32.2, 0.05), "got {}", ra);
    }

    /// Reference station at the June solstice
    #[test]
    fn test_extraterrestrial_radiation_reference_station() {
        let ra = extraterrestrial_radiation(-12.15, 180).unwrap();
        assert!(close(ra, 28.06, 0.01), "got {}", ra);
    }

    /// Polar night clamps to zero instead of failing
    #[test]
    fn test_polar_night_is_zero() {
        let ra = extraterrestrial_radiation(85.0, 355).unwrap();
        assert!(ra.abs() < 1e-9);
    }

    /// Clear-sky radiation grows with altitude
    #[test]
    fn test_clear_sky_radiation() {
        let ra = extraterrestrial_radiation(-12.15, 180).unwrap();
        let rso = clear_sky_radiation(-12.15, 400.0, 180).unwrap();
        assert!(close(rso, 0.758 * ra, 1e-9));
        assert!(clear_sky_radiation(-12.15, 1000.0, 180).unwrap() > rso);
    }

    /// Invalid geometry is a domain error
    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            extraterrestrial_radiation(90.0, 180),
            Err(Et0Error::NumericDomain(_))
        ));
        assert!(matches!(
            extraterrestrial_radiation(f64::NAN, 180),
            Err(Et0Error::NumericDomain(_))
        ));
        assert!(extraterrestrial_radiation(-12.0, 0).is_err());
        assert!(extraterrestrial_radiation(-12.0, 367).is_err());
        assert!(extraterrestrial_radiation(-12.0, 366).is_ok());
    }

    /// Values above 1000 are treated as W/m²
    #[test]
    fn test_normalize_solar_radiation() {
        assert_eq!(normalize_solar_radiation(22.5), 22.5);
        assert_eq!(normalize_solar_radiation(250.0), 250.0);
        assert_eq!(normalize_solar_radiation(1000.0), 1000.0);
        assert!(close(normalize_solar_radiation(1200.0), 103.68, 1e-9));
        assert!(!is_irradiance(1000.0));
        assert!(is_irradiance(1000.01));
    }

    /// Standard atmosphere at the reference altitude
    #[test]
    fn test_atmospheric_pressure() {
        assert!(close(atmospheric_pressure(0.0).unwrap(), 101.3, 1e-9));
        let pressure = atmospheric_pressure(400.0).unwrap();
        assert!(close(pressure, 96.66, 0.01), "got {}", pressure);
        assert!(close(psychrometric_constant(pressure), 0.0643, 0.0001));
        assert!(atmospheric_pressure(50_000.0).is_err());
    }

    /// Net radiation for a clear day at the reference station
    #[test]
    fn test_net_radiation() {
        let ea = actual_vapor_pressure(30.0, 18.0, HumidityInput::Mean(65.0)).unwrap();
        let rn = net_radiation(22.5, 24.0, ea, -12.15, 400.0, 180).unwrap();
        assert!(rn > 0.0 && rn < 0.77 * 22.5);
    }

    /// Negative radiation or vapor pressure are rejected
    #[test]
    fn test_net_radiation_rejects_negative_inputs() {
        assert!(net_radiation(-1.0, 24.0, 2.0, -12.15, 400.0, 180).is_err());
        assert!(net_radiation(20.0, 24.0, -0.1, -12.15, 400.0, 180).is_err());
        assert!(net_radiation(20.0, 24.0, 2.0, -12.15, 400.0, 400).is_err());
    }

    /// FAO-56 saturation vapor pressure table values
    #[test]
    fn test_saturation_vapor_pressure() {
        assert!(close(saturation_vapor_pressure(20.0), 2.338, 0.001));
        assert!(close(saturation_vapor_pressure(30.0), 4.243, 0.001));
    }

    /// Humidity extremes pair with the opposite temperature extreme
    #[test]
    fn test_actual_vapor_pressure_extremes() {
        let ea = actual_vapor_pressure(25.0, 18.0, HumidityInput::Extremes { max: 82.0, min: 54.0 })
            .unwrap();
        assert!(close(ea, 1.70, 0.01), "got {}", ea);
        assert!(actual_vapor_pressure(25.0, 18.0, HumidityInput::Mean(-50.0)).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Ra is finite, non-negative and below the solar constant bound
        #[test]
        fn prop_extraterrestrial_radiation_bounded(
            latitude in -89.9..89.9f64,
            day_of_year in 1u32..=366
        ) {
            let ra = extraterrestrial_radiation(latitude, day_of_year).unwrap();
            prop_assert!(ra.is_finite());
            prop_assert!(ra >= 0.0);
            prop_assert!(ra < 50.0);
        }

        /// Rn is never negative
        #[test]
        fn prop_net_radiation_non_negative(
            rs in 0.0..40.0f64,
            t_mean in -10.0..45.0f64,
            ea in 0.0..6.0f64,
            latitude in -60.0..60.0f64,
            altitude in 0.0..3000.0f64,
            day_of_year in 1u32..=366
        ) {
            let rn = net_radiation(rs, t_mean, ea, latitude, altitude, day_of_year).unwrap();
            prop_assert!(rn >= 0.0);
        }

        /// A normalized reading is not converted a second time
        #[test]
        fn prop_normalization_does_not_double_convert(raw in 0.0..11_000.0f64) {
            let once = normalize_solar_radiation(raw);
            prop_assert_eq!(normalize_solar_radiation(once), once);
        }

        /// Normalization never increases a reading
        #[test]
        fn prop_normalization_never_increases(raw in 0.0..5000.0f64) {
            prop_assert!(normalize_solar_radiation(raw) <= raw);
        }
    }
}
