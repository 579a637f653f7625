//! Vapor pressure and psychrometric relations (FAO-56 chapter 3)

use super::error::{ensure_finite, Et0Error, Et0Outcome};

/// Psychrometric constant at sea level, kPa/°C
pub const SEA_LEVEL_PSYCHROMETRIC_CONSTANT: f64 = 0.066;

/// Saturation vapor pressure at air temperature `t` (°C), kPa
pub fn saturation_vapor_pressure(t: f64) -> f64 {
    0.6108 * ((17.27 * t) / (t + 237.3)).exp()
}

/// Slope of the saturation vapor pressure curve at `t` (°C), kPa/°C
pub fn vapor_pressure_slope(t: f64) -> f64 {
    4098.0 * saturation_vapor_pressure(t) / (t + 237.3).powi(2)
}

/// Psychrometric constant from atmospheric pressure (kPa), kPa/°C
pub fn psychrometric_constant(pressure_kpa: f64) -> f64 {
    0.000665 * pressure_kpa
}

/// Mean saturation vapor pressure from daily extremes, kPa
pub fn mean_saturation_vapor_pressure(t_max: f64, t_min: f64) -> f64 {
    (saturation_vapor_pressure(t_max) + saturation_vapor_pressure(t_min)) / 2.0
}

/// Relative humidity data available for the actual vapor pressure
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HumidityInput {
    /// Daily maximum and minimum relative humidity, %
    Extremes { max: f64, min: f64 },
    /// Mean relative humidity, %
    Mean(f64),
}

/// Actual vapor pressure, kPa.
///
/// Extremes pair RHmax with Tmin and RHmin with Tmax (FAO-56 eq. 17);
/// a mean value scales the mean saturation pressure (eq. 19).
pub fn actual_vapor_pressure(t_max: f64, t_min: f64, humidity: HumidityInput) -> Et0Outcome<f64> {
    let ea = match humidity {
        HumidityInput::Extremes { max, min } => {
            (saturation_vapor_pressure(t_min) * max / 100.0
                + saturation_vapor_pressure(t_max) * min / 100.0)
                / 2.0
        }
        HumidityInput::Mean(mean) => mean / 100.0 * mean_saturation_vapor_pressure(t_max, t_min),
    };
    let ea = ensure_finite(ea, "actual vapor pressure")?;
    if ea < 0.0 {
        return Err(Et0Error::NumericDomain(format!(
            "actual vapor pressure is negative ({ea:.3} kPa)"
        )));
    }
    Ok(ea)
}
