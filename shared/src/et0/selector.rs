//! Ordered fallback chain across the ET0 methods

use tracing::{debug, error, warn};

use crate::models::{AggregatedParameters, DataQuality, Et0Result, SiteContext};

use super::error::{Et0Error, Et0Outcome};
use super::methods::{
    default_estimate, hargreaves_samani, penman_monteith, priestley_taylor, temperature_only,
};

/// One step of the chain
pub type Et0Stage = fn(&AggregatedParameters, &SiteContext) -> Et0Outcome<Et0Result>;

/// Methods in descending order of required-data richness
pub const DEFAULT_STAGES: [Et0Stage; 4] = [
    penman_monteith,
    hargreaves_samani,
    priestley_taylor,
    temperature_only,
];

/// Estimate ET0 with the default method chain. Always returns a result.
pub fn estimate_et0(params: &AggregatedParameters, site: &SiteContext) -> Et0Result {
    select_with(&DEFAULT_STAGES, params, site)
}

/// Run `stages` in order and return the first acceptable result.
///
/// A stage is skipped when its inputs are missing or its computation hits a
/// numeric domain error. A result graded `muito_baixa` is held back while
/// later stages remain; the first such result is returned only if no later
/// stage produces a better-graded one.
pub fn select_with(
    stages: &[Et0Stage],
    params: &AggregatedParameters,
    site: &SiteContext,
) -> Et0Result {
    let mut held_back: Option<Et0Result> = None;

    for stage in stages {
        match stage(params, site) {
            Ok(result) if result.quality == DataQuality::VeryLow => {
                debug!(method = %result.method, "very low quality estimate, trying next method");
                held_back.get_or_insert(result);
            }
            Ok(result) => {
                debug!(method = %result.method, value = result.value, quality = %result.quality, "ET0 estimated");
                return result;
            }
            Err(Et0Error::MissingData(field)) => {
                debug!(field, "ET0 method skipped, missing input");
            }
            Err(err @ Et0Error::NumericDomain(_)) => {
                warn!(error = %err, "ET0 method failed, falling back");
            }
        }
    }

    held_back.unwrap_or_else(|| {
        error!("every ET0 method failed; using the typical-day value");
        default_estimate()
    })
}
