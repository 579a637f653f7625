//! Calendar-based ET0 used when no station data can be obtained

use crate::models::{DataQuality, Et0Method, Et0Result, Precision, UsedParameters};

/// ET0 for the wet/hot season (September to February), mm/day
pub const WET_SEASON_ET0: f64 = 4.5;
/// ET0 for the transition months (March to May), mm/day
pub const TRANSITION_ET0: f64 = 3.0;
/// ET0 for the dry/cool months (June to August), mm/day
pub const DRY_SEASON_ET0: f64 = 2.5;
/// Note attached to every seasonal estimate
pub const SEASONAL_ESTIMATE_NOTE: &str = "dados da estação indisponíveis; estimativa sazonal";

/// Representative ET0 for a calendar month (1 = January)
pub fn seasonal_value(month: u32) -> f64 {
    match month {
        9..=12 | 1 | 2 => WET_SEASON_ET0,
        3..=5 => TRANSITION_ET0,
        _ => DRY_SEASON_ET0,
    }
}

/// Seasonal estimate for the given month
pub fn seasonal_estimate(month: u32) -> Et0Result {
    Et0Result::new(
        seasonal_value(month),
        Et0Method::SeasonalEstimate,
        DataQuality::VeryLow,
        UsedParameters::new().with("month", month as f64, Precision::Integer),
    )
    .with_note(SEASONAL_ESTIMATE_NOTE)
}
