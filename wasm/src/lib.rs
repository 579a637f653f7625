//! WebAssembly module for the weather-station dashboard
//!
//! Provides client-side computation for:
//! - ET0 estimation from aggregated parameters or raw station records
//! - Radiation helpers used by the dashboard charts
//! - Quality grading and seasonal fallback values

use shared::{AggregatedParameters, SiteContext};
use wasm_bindgen::prelude::*;

fn parse_site(site_json: &str) -> Result<SiteContext, String> {
    serde_json::from_str(site_json).map_err(|e| format!("Invalid site JSON: {}", e))
}

fn encode(result: &shared::Et0Result) -> Result<String, String> {
    serde_json::to_string(result).map_err(|e| format!("Failed to encode result: {}", e))
}

fn et0_from_parameters(params_json: &str, site_json: &str) -> Result<String, String> {
    let params: AggregatedParameters = serde_json::from_str(params_json)
        .map_err(|e| format!("Invalid parameters JSON: {}", e))?;
    let site = parse_site(site_json)?;
    encode(&shared::estimate_et0(&params, &site))
}

fn et0_from_records(records_json: &str, site_json: &str) -> Result<String, String> {
    let records: serde_json::Value = serde_json::from_str(records_json)
        .map_err(|e| format!("Invalid records JSON: {}", e))?;
    let site = parse_site(site_json)?;
    encode(&shared::estimate_et0(&shared::extract_from_json(&records), &site))
}

/// Estimate ET0 from aggregated parameters; returns the result as JSON
#[wasm_bindgen]
pub fn calculate_et0(params_json: &str, site_json: &str) -> Result<String, JsValue> {
    et0_from_parameters(params_json, site_json).map_err(|e| JsValue::from_str(&e))
}

/// Estimate ET0 from an array of raw station records
#[wasm_bindgen]
pub fn calculate_et0_from_records(records_json: &str, site_json: &str) -> Result<String, JsValue> {
    et0_from_records(records_json, site_json).map_err(|e| JsValue::from_str(&e))
}

/// Extraterrestrial radiation Ra in MJ/m²/day
#[wasm_bindgen]
pub fn extraterrestrial_radiation(latitude: f64, day_of_year: u32) -> Result<f64, JsValue> {
    shared::extraterrestrial_radiation(latitude, day_of_year)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Solar radiation in MJ/m²/day (values above 1000 are read as W/m²)
#[wasm_bindgen]
pub fn normalize_solar_radiation(raw: f64) -> f64 {
    shared::normalize_solar_radiation(raw)
}

/// Quality label for the number of measured quantities
#[wasm_bindgen]
pub fn grade_quality(count: u32) -> String {
    shared::grade_by_parameter_count(count as usize).to_string()
}

/// Seasonal ET0 for a month (1 = January)
#[wasm_bindgen]
pub fn seasonal_et0(month: u32) -> f64 {
    shared::seasonal_value(month)
}

/// Seasonal ET0 for the current month in the browser's local time
#[wasm_bindgen]
pub fn seasonal_et0_now() -> f64 {
    let month = js_sys::Date::new_0().get_month() + 1;
    shared::seasonal_value(month)
}

/// Check a station identifier before sending it to the proxy
#[wasm_bindgen]
pub fn is_valid_station_id(id: &str) -> bool {
    shared::validate_station_id(id).is_ok()
}
