//! Route definitions for the station proxy

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::services::historical::MAX_UPLOAD_BYTES;
use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Upstream proxy and ET0 action dispatcher
        .route("/weather", get(handlers::dispatch_action))
        // ET0 for current conditions and uploaded exports
        .route("/et0", get(handlers::get_et0))
        .route(
            "/et0/historical",
            post(handlers::post_historical_et0).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
