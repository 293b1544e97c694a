//! REST API endpoints.
//!
//! Axum-based HTTP API mirroring the assistant-coach surface: player and
//! team analysis, series listings and ingestion, dashboards, and the
//! assistant prompts (personalized insights, review agenda, scenario
//! prediction).

pub mod routes;
pub mod state;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::telemetry::TelemetryError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A requested analysis has no cached history yet. Distinct from
    /// upstream not-found: the fix is to ingest some series first.
    #[error("No local data: {0}")]
    NoData(String),

    #[error("Upstream access forbidden: {0}")]
    PermissionDenied(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Upstream timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NoData(_) => (StatusCode::NOT_FOUND, "NO_DATA"),
            ApiError::PermissionDenied(_) => (StatusCode::FORBIDDEN, "UPSTREAM_FORBIDDEN"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<TelemetryError> for ApiError {
    fn from(e: TelemetryError) -> Self {
        match e {
            TelemetryError::PermissionDenied { scope } => ApiError::PermissionDenied(format!(
                "GRID API access limited ({scope}). Verify your API key permissions in the GRID portal."
            )),
            TelemetryError::NotFound { id } => ApiError::NotFound(format!(
                "Series {id} not found in GRID database. Verify the series id is correct."
            )),
            TelemetryError::Malformed(message) => ApiError::Upstream(message),
            TelemetryError::Timeout(secs) => {
                ApiError::Timeout(format!("GRID request exceeded {secs}s"))
            }
            TelemetryError::Http(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

/// Build the API router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/players", get(routes::players::list_players))
        .route("/player/:name/stats", get(routes::players::player_stats))
        .route(
            "/player/:name/analysis",
            get(routes::players::player_analysis),
        )
        .route("/series/recent", get(routes::series::recent_series))
        .route("/series/multi", get(routes::series::multi_title_series))
        .route("/series/:id/insights", get(routes::series::series_insights))
        .route("/team/:name/analysis", get(routes::team::team_analysis))
        .route("/team/:name/matches", get(routes::team::team_matches))
        .route("/dashboard/:game", get(routes::dashboard::game_dashboard))
        .route(
            "/dashboard/:game/update",
            post(routes::dashboard::update_dashboard),
        )
        .route(
            "/assistant/personalized-insights",
            post(routes::assistant::personalized_insights),
        )
        .route(
            "/assistant/macro-review",
            post(routes::assistant::macro_review),
        )
        .route(
            "/assistant/predict-scenario",
            post(routes::assistant::predict_scenario),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
