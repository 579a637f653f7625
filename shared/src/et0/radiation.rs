//! Solar radiation model (FAO-56 chapter 3)

use std::f64::consts::PI;

use super::error::{ensure_finite, Et0Error, Et0Outcome};

/// Solar constant, MJ m⁻² min⁻¹
pub const SOLAR_CONSTANT: f64 = 0.0820;
/// Albedo of the hypothetical grass reference crop
pub const REFERENCE_ALBEDO: f64 = 0.23;
/// Stefan-Boltzmann constant, MJ K⁻⁴ m⁻² day⁻¹
pub const STEFAN_BOLTZMANN: f64 = 4.903e-9;
/// Conversion from mean irradiance (W/m²) to daily energy (MJ/m²/day)
pub const WATTS_TO_MJ_PER_DAY: f64 = 0.0864;
/// Raw radiation values above this are taken as W/m²
pub const IRRADIANCE_THRESHOLD: f64 = 1000.0;

/// Bring a raw solar radiation reading to MJ/m²/day.
///
/// Values above 1000 are read as mean irradiance in W/m² and converted;
/// anything else is assumed to be MJ/m²/day already. The threshold is a
/// heuristic: low W/m² readings pass through unconverted.
pub fn normalize_solar_radiation(raw: f64) -> f64 {
    if raw > IRRADIANCE_THRESHOLD {
        raw * WATTS_TO_MJ_PER_DAY
    } else {
        raw
    }
}

/// True when `normalize_solar_radiation` would convert the value
pub fn is_irradiance(raw: f64) -> bool {
    raw > IRRADIANCE_THRESHOLD
}

fn latitude_radians(latitude: f64) -> Et0Outcome<f64> {
    if !latitude.is_finite() || latitude.abs() >= 90.0 {
        return Err(Et0Error::NumericDomain(format!(
            "latitude {latitude} is outside (-90, 90)"
        )));
    }
    Ok(latitude.to_radians())
}

fn check_day_of_year(day_of_year: u32) -> Et0Outcome<f64> {
    if !(1..=366).contains(&day_of_year) {
        return Err(Et0Error::NumericDomain(format!(
            "day of year {day_of_year} is outside 1..=366"
        )));
    }
    Ok(day_of_year as f64)
}

/// Extraterrestrial radiation Ra for a daily period, MJ/m²/day
pub fn extraterrestrial_radiation(latitude: f64, day_of_year: u32) -> Et0Outcome<f64> {
    let phi = latitude_radians(latitude)?;
    let j = check_day_of_year(day_of_year)?;

    let angle = 2.0 * PI * j / 365.0;
    let inverse_distance = 1.0 + 0.033 * angle.cos();
    let declination = 0.409 * (angle - 1.39).sin();
    // Polar day/night: clamp so acos stays defined
    let sunset_hour_angle = (-phi.tan() * declination.tan()).clamp(-1.0, 1.0).acos();

    let ra = (24.0 * 60.0 / PI)
        * SOLAR_CONSTANT
        * inverse_distance
        * (sunset_hour_angle * phi.sin() * declination.sin()
            + phi.cos() * declination.cos() * sunset_hour_angle.sin());

    Ok(ensure_finite(ra, "extraterrestrial radiation")?.max(0.0))
}

/// Clear-sky solar radiation Rso, MJ/m²/day
pub fn clear_sky_radiation(latitude: f64, altitude: f64, day_of_year: u32) -> Et0Outcome<f64> {
    let ra = extraterrestrial_radiation(latitude, day_of_year)?;
    let rso = (0.75 + 2e-5 * altitude) * ra;
    ensure_finite(rso, "clear-sky radiation")
}

/// Net radiation Rn at the crop surface, MJ/m²/day.
///
/// `rs` is observed solar radiation in MJ/m²/day, `t_mean` in °C and `ea`
/// the actual vapor pressure in kPa. The result is clamped to be
/// non-negative.
pub fn net_radiation(
    rs: f64,
    t_mean: f64,
    ea: f64,
    latitude: f64,
    altitude: f64,
    day_of_year: u32,
) -> Et0Outcome<f64> {
    if !rs.is_finite() || rs < 0.0 {
        return Err(Et0Error::NumericDomain(format!(
            "solar radiation {rs} must be a non-negative number"
        )));
    }
    if !ea.is_finite() || ea < 0.0 {
        return Err(Et0Error::NumericDomain(format!(
            "vapor pressure {ea} must be a non-negative number"
        )));
    }

    let rso = clear_sky_radiation(latitude, altitude, day_of_year)?;
    if rso <= 0.0 {
        return Err(Et0Error::NumericDomain(
            "clear-sky radiation is zero (polar night)".to_string(),
        ));
    }

    let net_shortwave = (1.0 - REFERENCE_ALBEDO) * rs;
    let relative_shortwave = (rs / rso).min(1.0);
    let t_kelvin = t_mean + 273.16;
    let net_longwave = STEFAN_BOLTZMANN
        * t_kelvin.powi(4)
        * (0.34 - 0.14 * ea.sqrt())
        * (1.35 * relative_shortwave - 0.35);

    let rn = ensure_finite(net_shortwave - net_longwave, "net radiation")?;
    Ok(rn.max(0.0))
}

/// Atmospheric pressure from altitude (standard atmosphere), kPa
pub fn atmospheric_pressure(altitude: f64) -> Et0Outcome<f64> {
    let base = (293.0 - 0.0065 * altitude) / 293.0;
    if !base.is_finite() || base <= 0.0 {
        return Err(Et0Error::NumericDomain(format!(
            "altitude {altitude} m is outside the barometric formula range"
        )));
    }
    Ok(101.3 * base.powf(5.26))
}
