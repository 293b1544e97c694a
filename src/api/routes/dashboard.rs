//! Per-game dashboard endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::routes::parse_game;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{mean, ratio, round1, round2};
use crate::ingest::ingest_series;
use crate::models::TeamMatchStat;
use crate::store::PlayerKey;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    /// Percentage, 1 decimal.
    pub win_rate: f64,
    pub avg_kda: f64,
    /// Percentage, 1 decimal.
    pub first_blood_rate: f64,
    pub total_matches: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardPlayer {
    pub name: String,
    pub matches_played: usize,
    pub avg_kda: f64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub game: String,
    pub title_id: u32,
    pub stats: DashboardStats,
    pub players: Vec<DashboardPlayer>,
    pub recent_matches: Vec<TeamMatchStat>,
}

/// Aggregate dashboard for one title, computed from the cached windows.
pub async fn game_dashboard(
    State(state): State<AppState>,
    Path(game): Path<String>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let game = parse_game(Some(game.as_str()))?;

    let team_records = state.store.all_team_stats(game).await;
    let win_rate = ratio(&team_records, |m| m.win).unwrap_or(0.0);
    let first_blood_rate = ratio(&team_records, |m| m.first_blood).unwrap_or(0.0);

    let mut players = Vec::new();
    let mut all_kdas = Vec::new();
    for name in state.store.player_names(game).await {
        let window = state
            .store
            .players
            .window(&PlayerKey::new(game, name.clone()))
            .await;
        let kdas: Vec<f64> = window.iter().map(|s| s.kda).collect();
        if let Some(avg) = mean(&kdas) {
            players.push(DashboardPlayer {
                name,
                matches_played: window.len(),
                avg_kda: round2(avg),
            });
        }
        all_kdas.extend(kdas);
    }

    let start = team_records.len().saturating_sub(10);
    let recent_matches = team_records[start..].to_vec();

    Ok(Json(DashboardResponse {
        game: game.to_string(),
        title_id: game.title_id(),
        stats: DashboardStats {
            win_rate: round1(win_rate * 100.0),
            avg_kda: mean(&all_kdas).map(round2).unwrap_or(0.0),
            first_blood_rate: round1(first_blood_rate * 100.0),
            total_matches: team_records.len(),
        },
        players,
        recent_matches,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub series_id: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub game: String,
    pub series_id: String,
    pub player_records: usize,
    pub team_records: usize,
    pub message: String,
}

/// Fetch one series end state and ingest it into the cached windows.
pub async fn update_dashboard(
    State(state): State<AppState>,
    Path(game): Path<String>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let game = parse_game(Some(game.as_str()))?;

    if request.series_id.is_empty() {
        return Err(ApiError::BadRequest("series_id is required".to_string()));
    }

    let end_state = state.telemetry.series_state(&request.series_id).await?;
    let outcome = ingest_series(&state.store, game, &request.series_id, &end_state).await;

    Ok(Json(UpdateResponse {
        success: true,
        game: game.to_string(),
        series_id: request.series_id,
        player_records: outcome.player_records,
        team_records: outcome.team_records,
        message: format!("Updated {game} dashboard data"),
    }))
}
