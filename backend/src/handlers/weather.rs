//! Action dispatcher for the station proxy

use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::UpstreamRequest;
use crate::AppState;

/// Actions accepted by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Stations,
    Sensors,
    Current,
    Historic,
    Et0,
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stations" => Ok(Action::Stations),
            "sensors" => Ok(Action::Sensors),
            "current" => Ok(Action::Current),
            "historic" => Ok(Action::Historic),
            "et0" => Ok(Action::Et0),
            other => Err(AppError::UnknownAction(other.to_string())),
        }
    }
}

/// Query parameters of the dispatcher
#[derive(Debug, Deserialize, Validate)]
pub struct ProxyQuery {
    #[validate(length(min = 1, max = 32))]
    pub action: String,
    #[validate(length(min = 1, max = 64))]
    pub station_id: Option<String>,
    pub start_timestamp: Option<i64>,
    pub end_timestamp: Option<i64>,
}

fn required_timestamp(value: Option<i64>, field: &str) -> AppResult<i64> {
    value.ok_or_else(|| AppError::Validation {
        field: field.to_string(),
        message: format!("{} is required for historic data", field),
        message_pt: format!("{} é obrigatório para dados históricos", field),
    })
}

/// Forward an action to the telemetry API or compute ET0
pub async fn dispatch_action(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> AppResult<Json<Value>> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let action: Action = query.action.parse()?;
    let station_id = state.resolve_station_id(query.station_id.as_deref())?;

    tracing::debug!(?action, station_id = %station_id, "Dispatching action");

    let request = match action {
        Action::Stations => UpstreamRequest::Stations,
        Action::Sensors => UpstreamRequest::Sensors,
        Action::Current => UpstreamRequest::Current { station_id },
        Action::Historic => UpstreamRequest::historic(
            station_id,
            required_timestamp(query.start_timestamp, "start_timestamp")?,
            required_timestamp(query.end_timestamp, "end_timestamp")?,
        )?,
        Action::Et0 => {
            let response = state.et0_service().estimate(&station_id).await;
            let body = serde_json::to_value(response)
                .map_err(|e| AppError::Internal(format!("Failed to encode ET0 response: {}", e)))?;
            return Ok(Json(body));
        }
    };

    Ok(Json(state.gateway.fetch(&request).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!("stations".parse::<Action>().unwrap(), Action::Stations);
        assert_eq!(" et0 ".parse::<Action>().unwrap(), Action::Et0);
        assert!(matches!(
            "delete".parse::<Action>(),
            Err(AppError::UnknownAction(action)) if action == "delete"
        ));
    }

    #[test]
    fn test_proxy_query_validation() {
        let query = ProxyQuery {
            action: "current".to_string(),
            station_id: Some("x".repeat(65)),
            start_timestamp: None,
            end_timestamp: None,
        };
        assert!(query.validate().is_err());

        let query = ProxyQuery {
            action: String::new(),
            station_id: None,
            start_timestamp: None,
            end_timestamp: None,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_required_timestamp() {
        assert_eq!(required_timestamp(Some(5), "start_timestamp").unwrap(), 5);
        assert!(matches!(
            required_timestamp(None, "end_timestamp"),
            Err(AppError::Validation { field, .. }) if field == "end_timestamp"
        ));
    }
}
