//! Team macro analysis and match history endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::routes::parse_game;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::enrich::CommentaryKind;
use crate::insights::team::{analyze_team, TeamMacroAnalysis};
use crate::models::TeamMatchStat;
use crate::store::TeamKey;

#[derive(Debug, Deserialize)]
pub struct TeamParams {
    pub game: Option<String>,
    pub limit: Option<usize>,
}

/// Comprehensive team macro strategy analysis.
pub async fn team_analysis(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<TeamParams>,
) -> Result<Json<TeamMacroAnalysis>, ApiError> {
    let game = parse_game(params.game.as_deref())?;

    let team_history = state
        .store
        .teams
        .window(&TeamKey::new(game, name.clone()))
        .await;
    let player_stats = state.store.all_player_stats(game).await;

    let mut analysis = analyze_team(&name, game, &team_history, &player_stats).ok_or_else(|| {
        ApiError::NoData(format!(
            "No team data available for {name}. Analyze some series first."
        ))
    })?;

    let metric_lines = vec![
        format!("Win rate: {:.1}%", analysis.win_rate),
        format!("Avg dragons: {:.1}", analysis.objective_control.avg_dragons),
        format!("Avg barons: {:.2}", analysis.objective_control.avg_barons),
        format!(
            "First blood rate: {:.1}%",
            analysis.objective_control.first_blood_rate
        ),
    ];
    analysis.commentary = Some(
        state
            .enricher
            .commentary(
                CommentaryKind::TeamMacro,
                &format!("the macro strategy of {name}"),
                &metric_lines,
            )
            .await,
    );

    Ok(Json(analysis))
}

/// A team's recent derived match records, most recent last.
pub async fn team_matches(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<TeamParams>,
) -> Result<Json<Vec<TeamMatchStat>>, ApiError> {
    let game = parse_game(params.game.as_deref())?;
    let limit = params.limit.unwrap_or(10);

    let window = state.store.teams.window(&TeamKey::new(game, name)).await;
    let start = window.len().saturating_sub(limit);
    Ok(Json(window[start..].to_vec()))
}
