//! ET0 endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::et0::Et0Response;
use crate::services::historical::{historical_et0, HistoricalEt0Response};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct StationQuery {
    #[validate(length(min = 1, max = 64))]
    pub station_id: Option<String>,
}

/// Current ET0 for a station
pub async fn get_et0(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> AppResult<Json<Et0Response>> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let station_id = state.resolve_station_id(query.station_id.as_deref())?;
    Ok(Json(state.et0_service().estimate(&station_id).await))
}

/// Per-day ET0 for an uploaded CSV export
pub async fn post_historical_et0(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
    body: String,
) -> AppResult<Json<HistoricalEt0Response>> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let station_id = state.resolve_station_id(query.station_id.as_deref())?;
    let station = state.stations.lookup(&station_id);
    Ok(Json(historical_et0(&body, &station_id, station)?))
}
