//! Series listing and insight endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::routes::parse_game;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::ingest::{ingest_series, SeriesInsight};
use crate::models::SeriesRef;
use crate::telemetry::{self, TelemetryError};

const DEFAULT_LIMIT: u32 = 10;
const MAX_MULTI_TITLES: usize = 10;

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub game: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RecentSeriesResponse {
    pub game: String,
    pub title_id: u32,
    pub series_count: usize,
    pub series: Vec<SeriesRef>,
}

/// Recent series for one title.
pub async fn recent_series(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> Result<Json<RecentSeriesResponse>, ApiError> {
    let game = parse_game(params.game.as_deref())?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    let series = state.telemetry.recent_series(game.title_id(), limit).await?;

    Ok(Json(RecentSeriesResponse {
        game: game.to_string(),
        title_id: game.title_id(),
        series_count: series.len(),
        series,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MultiParams {
    /// Comma-separated GRID title ids, e.g. "3,21".
    pub title_ids: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TitleSlotResponse {
    pub title_id: u32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,
    pub series_count: usize,
    pub series: Vec<SeriesRef>,
}

#[derive(Debug, Serialize)]
pub struct MultiSeriesResponse {
    pub total_games: usize,
    pub games: Vec<TitleSlotResponse>,
}

/// Recent series for several titles at once, fetched concurrently. Each
/// title gets its own result slot; one title failing never hides the
/// others.
pub async fn multi_title_series(
    State(state): State<AppState>,
    Query(params): Query<MultiParams>,
) -> Result<Json<MultiSeriesResponse>, ApiError> {
    let raw = params.title_ids.unwrap_or_else(|| "3,21".to_string());
    let title_ids: Vec<u32> = raw
        .split(',')
        .map(|part| {
            part.trim().parse::<u32>().map_err(|_| {
                ApiError::BadRequest(
                    "Invalid title_ids format. Use comma-separated integers (e.g. '3,21')"
                        .to_string(),
                )
            })
        })
        .collect::<Result<_, _>>()?;

    if title_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one title_id must be provided".to_string(),
        ));
    }
    if title_ids.len() > MAX_MULTI_TITLES {
        return Err(ApiError::BadRequest(format!(
            "Maximum {MAX_MULTI_TITLES} titles can be fetched at once"
        )));
    }

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let slots = telemetry::fetch_many(state.telemetry.clone(), &title_ids, limit).await;

    let games: Vec<TitleSlotResponse> = slots
        .into_iter()
        .map(|slot| match slot.result {
            Ok(series) => TitleSlotResponse {
                title_id: slot.title_id,
                success: true,
                error: None,
                game_name: series.first().and_then(|s| s.title_name.clone()),
                series_count: series.len(),
                series,
            },
            Err(e) => TitleSlotResponse {
                title_id: slot.title_id,
                success: false,
                error: Some(e.to_string()),
                game_name: None,
                series_count: 0,
                series: Vec::new(),
            },
        })
        .collect();

    Ok(Json(MultiSeriesResponse {
        total_games: games.len(),
        games,
    }))
}

/// Fetch a series end state, derive records into the store, and return
/// the narrative insight. When end-state access is forbidden, falls back
/// to a metadata-only summary before surfacing the permission error.
pub async fn series_insights(
    State(state): State<AppState>,
    Path(series_id): Path<String>,
    Query(params): Query<RecentParams>,
) -> Result<Json<SeriesInsight>, ApiError> {
    let game = parse_game(params.game.as_deref())?;

    match state.telemetry.series_state(&series_id).await {
        Ok(end_state) => {
            let outcome = ingest_series(&state.store, game, &series_id, &end_state).await;
            Ok(Json(outcome.insight))
        }
        Err(TelemetryError::PermissionDenied { scope }) => {
            warn!(series_id, scope, "end-state access denied, trying metadata");
            let details = state.telemetry.series_details(&series_id).await?;

            let mut summary = format!("Series data retrieved: {}", details.name);
            if let Some(tournament) = &details.tournament {
                summary.push_str(&format!(" in {tournament}"));
            }
            if !details.teams.is_empty() {
                summary.push_str(&format!(". Teams: {}", details.teams.join(", ")));
            }

            Ok(Json(SeriesInsight {
                series_id,
                summary,
                strategic_impact:
                    "Detailed player statistics require file-download API access; only series metadata is available with the current permissions."
                        .to_string(),
                recommendations: vec![
                    "Request file-download permissions for full game-by-game analytics"
                        .to_string(),
                    "Series metadata retrieval is working; the integration is healthy"
                        .to_string(),
                ],
            }))
        }
        Err(e) => Err(e.into()),
    }
}
