//! The individual ET0 methods, from most to least data-hungry
//!
//! Every method checks its own preconditions and returns
//! [`Et0Error::MissingData`] when an input is absent, so the selector can
//! move on without inspecting the parameters itself.

use crate::models::{
    AggregatedParameters, DataQuality, Et0Method, Et0Result, Precision, SiteContext,
    UsedParameters,
};

use super::atmosphere::{
    actual_vapor_pressure, mean_saturation_vapor_pressure, psychrometric_constant,
    vapor_pressure_slope, HumidityInput, SEA_LEVEL_PSYCHROMETRIC_CONSTANT,
};
use super::error::{ensure_finite, Et0Error, Et0Outcome};
use super::radiation::{
    atmospheric_pressure, extraterrestrial_radiation, is_irradiance, net_radiation,
    normalize_solar_radiation,
};

/// Wind speed at 2 m assumed when the station reports none, m/s
pub const DEFAULT_WIND_SPEED: f64 = 2.0;
/// Relative humidity assumed when the station reports none, %
pub const DEFAULT_RELATIVE_HUMIDITY: f64 = 70.0;
/// Radiation adjustment coefficient used by the Hargreaves-Samani method
pub const HARGREAVES_KRS: f64 = 0.19;
/// Priestley-Taylor coefficient
pub const PRIESTLEY_TAYLOR_ALPHA: f64 = 1.26;
/// Share of solar radiation taken as net radiation by Priestley-Taylor
pub const PRIESTLEY_TAYLOR_NET_FRACTION: f64 = 0.77;
/// Latent heat of vaporization, MJ/kg
pub const LATENT_HEAT: f64 = 2.45;
/// ET0 per °C of mean temperature in the temperature-only method
pub const TEMPERATURE_ONLY_FACTOR: f64 = 0.3;
/// Typical-day ET0 used when not even temperature is known, mm/day
pub const DEFAULT_ET0: f64 = 3.5;

const RADIATION_CONVERTED_NOTE: &str = "radiação convertida de W/m² para MJ/m²/dia (x0,0864)";

fn required(value: Option<f64>, field: &'static str) -> Et0Outcome<f64> {
    value.ok_or(Et0Error::MissingData(field))
}

/// Penman-Monteith FAO-56 for a daily timestep (soil heat flux G = 0).
///
/// Requires both temperature extremes and solar radiation. Wind and humidity
/// fall back to 2.0 m/s and 70 % when absent.
pub fn penman_monteith(params: &AggregatedParameters, site: &SiteContext) -> Et0Outcome<Et0Result> {
    let t_max = required(params.temp_max, "temp_max")?;
    let t_min = required(params.temp_min, "temp_min")?;
    let raw_radiation = required(params.solar_radiation, "solar_radiation")?;

    let mut notes = Vec::new();
    let rs = normalize_solar_radiation(raw_radiation);
    if is_irradiance(raw_radiation) {
        notes.push(RADIATION_CONVERTED_NOTE.to_string());
    }

    let u2 = params.wind_speed.unwrap_or_else(|| {
        notes.push(format!("vento padrão de {DEFAULT_WIND_SPEED:.1} m/s"));
        DEFAULT_WIND_SPEED
    });
    let humidity = match (params.humidity_max, params.humidity_min, params.humidity_mean) {
        (Some(max), Some(min), _) => HumidityInput::Extremes { max, min },
        (_, _, Some(mean)) => HumidityInput::Mean(mean),
        _ => {
            notes.push(format!("umidade padrão de {DEFAULT_RELATIVE_HUMIDITY:.0}%"));
            HumidityInput::Mean(DEFAULT_RELATIVE_HUMIDITY)
        }
    };

    let t_mean = (t_max + t_min) / 2.0;
    let es = mean_saturation_vapor_pressure(t_max, t_min);
    let ea = actual_vapor_pressure(t_max, t_min, humidity)?;
    let vpd = (es - ea).max(0.0);
    let delta = vapor_pressure_slope(t_mean);
    let gamma = psychrometric_constant(atmospheric_pressure(site.altitude)?);
    let rn = net_radiation(rs, t_mean, ea, site.latitude, site.altitude, site.day_of_year)?;
    let soil_heat_flux = 0.0;

    let numerator = 0.408 * delta * (rn - soil_heat_flux)
        + gamma * (900.0 / (t_mean + 273.0)) * u2 * vpd;
    let denominator = delta + gamma * (1.0 + 0.34 * u2);
    let et0 = ensure_finite(numerator / denominator, "Penman-Monteith ET0")?;

    let mut used = UsedParameters::new()
        .with("temp_max", t_max, Precision::Temperature)
        .with("temp_min", t_min, Precision::Temperature)
        .with("temp_mean", t_mean, Precision::Temperature)
        .with("solar_radiation", rs, Precision::Radiation)
        .with("net_radiation", rn, Precision::Radiation)
        .with("wind_speed", u2, Precision::Wind)
        .with("latitude", site.latitude, Precision::Latitude)
        .with("altitude", site.altitude, Precision::Altitude)
        .with("day_of_year", site.day_of_year as f64, Precision::Integer);
    used = match humidity {
        HumidityInput::Extremes { max, min } => used
            .with("humidity_max", max, Precision::Humidity)
            .with("humidity_min", min, Precision::Humidity),
        HumidityInput::Mean(mean) => used.with("humidity", mean, Precision::Humidity),
    };

    let result = Et0Result::new(et0, Et0Method::PenmanMonteith, DataQuality::High, used);
    Ok(attach_notes(result, notes))
}

/// Hargreaves-Samani: temperature extremes plus extraterrestrial radiation.
pub fn hargreaves_samani(params: &AggregatedParameters, site: &SiteContext) -> Et0Outcome<Et0Result> {
    let t_max = required(params.temp_max, "temp_max")?;
    let t_min = required(params.temp_min, "temp_min")?;

    let range = t_max - t_min;
    if range < 0.0 {
        return Err(Et0Error::NumericDomain(format!(
            "temperature range is negative (max {t_max}, min {t_min})"
        )));
    }
    // A single reading collapses the extremes; √0 would report zero ET0.
    if range == 0.0 {
        return Err(Et0Error::MissingData("temperature range"));
    }
    let ra = extraterrestrial_radiation(site.latitude, site.day_of_year)?;
    let t_mean = (t_max + t_min) / 2.0;

    let et0 = 0.0023 * (t_mean + 17.8) * range.sqrt() * ra * HARGREAVES_KRS;
    let et0 = ensure_finite(et0, "Hargreaves-Samani ET0")?;

    let used = UsedParameters::new()
        .with("temp_max", t_max, Precision::Temperature)
        .with("temp_min", t_min, Precision::Temperature)
        .with("temp_mean", t_mean, Precision::Temperature)
        .with("extraterrestrial_radiation", ra, Precision::Radiation)
        .with("latitude", site.latitude, Precision::Latitude)
        .with("day_of_year", site.day_of_year as f64, Precision::Integer);

    Ok(Et0Result::new(et0, Et0Method::HargreavesSamani, DataQuality::Medium, used))
}

/// Priestley-Taylor with net radiation approximated as 0.77·Rs and a fixed
/// sea-level psychrometric constant.
pub fn priestley_taylor(params: &AggregatedParameters, _site: &SiteContext) -> Et0Outcome<Et0Result> {
    let t_max = required(params.temp_max, "temp_max")?;
    let t_min = required(params.temp_min, "temp_min")?;
    let raw_radiation = required(params.solar_radiation, "solar_radiation")?;

    let rs = normalize_solar_radiation(raw_radiation);
    if rs < 0.0 {
        return Err(Et0Error::NumericDomain(format!(
            "solar radiation {rs} is negative"
        )));
    }
    let t_mean = (t_max + t_min) / 2.0;
    let delta = vapor_pressure_slope(t_mean);
    let gamma = SEA_LEVEL_PSYCHROMETRIC_CONSTANT;
    let rn = PRIESTLEY_TAYLOR_NET_FRACTION * rs;

    let et0 = PRIESTLEY_TAYLOR_ALPHA * (delta / (delta + gamma)) * (rn / LATENT_HEAT);
    let et0 = ensure_finite(et0, "Priestley-Taylor ET0")?;

    let used = UsedParameters::new()
        .with("temp_max", t_max, Precision::Temperature)
        .with("temp_min", t_min, Precision::Temperature)
        .with("temp_mean", t_mean, Precision::Temperature)
        .with("solar_radiation", rs, Precision::Radiation)
        .with("net_radiation", rn, Precision::Radiation);

    let result = Et0Result::new(et0, Et0Method::PriestleyTaylor, DataQuality::Medium, used);
    if is_irradiance(raw_radiation) {
        Ok(result.with_note(RADIATION_CONVERTED_NOTE))
    } else {
        Ok(result)
    }
}

/// Temperature-only estimate, or the typical-day constant without any
/// temperature. Never fails.
pub fn temperature_only(params: &AggregatedParameters, _site: &SiteContext) -> Et0Outcome<Et0Result> {
    let Some(t_mean) = params.representative_temperature() else {
        return Ok(default_estimate());
    };

    let used = UsedParameters::new()
        .with_optional("temp_max", params.temp_max, Precision::Temperature)
        .with_optional("temp_min", params.temp_min, Precision::Temperature)
        .with("temp_mean", t_mean, Precision::Temperature);

    Ok(Et0Result::new(
        TEMPERATURE_ONLY_FACTOR * t_mean,
        Et0Method::TemperatureOnly,
        DataQuality::Low,
        used,
    )
    .with_note("estimativa baseada apenas na temperatura"))
}

/// Typical-day value used when no usable data exists at all
pub fn default_estimate() -> Et0Result {
    Et0Result::new(
        DEFAULT_ET0,
        Et0Method::DefaultEstimate,
        DataQuality::VeryLow,
        UsedParameters::new(),
    )
    .with_note("sem dados meteorológicos; valor típico adotado")
}

fn attach_notes(result: Et0Result, notes: Vec<String>) -> Et0Result {
    if notes.is_empty() {
        result
    } else {
        result.with_note(notes.join("; "))
    }
}
