//! Player listing, raw stats, and analysis endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::routes::parse_game;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::enrich::CommentaryKind;
use crate::insights::player::{analyze_player, PlayerAnalysis};
use crate::models::MatchPlayerStat;
use crate::store::PlayerKey;

#[derive(Debug, Deserialize)]
pub struct GameParam {
    pub game: Option<String>,
}

/// Player names with cached history for a title.
pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<GameParam>,
) -> Result<Json<Vec<String>>, ApiError> {
    let game = parse_game(params.game.as_deref())?;
    Ok(Json(state.store.player_names(game).await))
}

/// A player's cached rolling window. An empty list is a success, not an
/// error.
pub async fn player_stats(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<GameParam>,
) -> Result<Json<Vec<MatchPlayerStat>>, ApiError> {
    let game = parse_game(params.game.as_deref())?;
    let window = state
        .store
        .players
        .window(&PlayerKey::new(game, name))
        .await;
    Ok(Json(window))
}

/// Full analysis of a player's recent performance.
pub async fn player_analysis(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<GameParam>,
) -> Result<Json<PlayerAnalysis>, ApiError> {
    let game = parse_game(params.game.as_deref())?;
    let history = state
        .store
        .players
        .window(&PlayerKey::new(game, name.clone()))
        .await;

    let mut analysis = analyze_player(&name, game, &history).ok_or_else(|| {
        ApiError::NoData(format!(
            "No data available for {name}. Analyze some series first."
        ))
    })?;

    let metric_lines = vec![
        format!("KDA: {:.2}", analysis.recent_averages.kda),
        format!("CS/min: {:.1}", analysis.recent_averages.cs_per_min),
        format!("Vision score: {:.1}", analysis.recent_averages.vision_score),
        format!("KDA trend: {}", analysis.trends.kda_trend),
        format!("Performance trend: {}", analysis.trends.performance_trend),
    ];
    analysis.commentary = Some(
        state
            .enricher
            .commentary(CommentaryKind::PlayerPerformance, &name, &metric_lines)
            .await,
    );

    Ok(Json(analysis))
}
