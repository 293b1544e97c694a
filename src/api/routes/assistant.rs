//! Assistant endpoints: personalized insights, review agendas, and
//! hypothetical-scenario predictions.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::routes::parse_game;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::enrich::CommentaryKind;
use crate::insights::personalized::{
    lol_player_insights, valorant_player_insights, PersonalizedInsights,
};
use crate::insights::review::{lol_review, valorant_review};
use crate::insights::scenario;
use crate::models::{
    Game, LolTimeline, ReviewAgenda, ScenarioPrediction, ScenarioRequest, ValorantTimeline,
};

#[derive(Debug, Deserialize)]
pub struct PersonalizedRequest {
    #[serde(default)]
    pub player_name: String,
    pub game: Option<String>,
    #[serde(default)]
    pub match_data: serde_json::Value,
}

/// Data-backed insights for one player in one concluded match.
pub async fn personalized_insights(
    State(state): State<AppState>,
    Json(request): Json<PersonalizedRequest>,
) -> Result<Json<PersonalizedInsights>, ApiError> {
    if request.player_name.is_empty() {
        return Err(ApiError::BadRequest("player_name is required".to_string()));
    }
    if request.match_data.is_null() {
        return Err(ApiError::BadRequest("match_data is required".to_string()));
    }

    let game = parse_game(request.game.as_deref())?;
    let player_name = &request.player_name;

    let mut insights = match game {
        Game::Valorant => {
            let timeline: ValorantTimeline = parse_match_data(request.match_data)?;
            valorant_player_insights(player_name, &timeline)
        }
        Game::Lol => {
            let timeline: LolTimeline = parse_match_data(request.match_data)?;
            lol_player_insights(player_name, &timeline)
        }
    }
    .ok_or_else(|| {
        ApiError::NotFound(format!("Player {player_name} not found in match data"))
    })?;

    let metric_lines: Vec<String> = insights
        .data_points
        .iter()
        .map(|dp| format!("{}: {}", dp.metric, dp.value))
        .collect();
    insights.commentary = Some(
        state
            .enricher
            .commentary(CommentaryKind::PlayerPerformance, player_name, &metric_lines)
            .await,
    );

    Ok(Json(insights))
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub game: Option<String>,
    #[serde(default)]
    pub match_data: serde_json::Value,
}

/// Automated game-review agenda for a concluded match.
pub async fn macro_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewAgenda>, ApiError> {
    if request.match_data.is_null() {
        return Err(ApiError::BadRequest("match_data is required".to_string()));
    }

    let game = parse_game(request.game.as_deref())?;

    let mut agenda = match game {
        Game::Valorant => {
            let timeline: ValorantTimeline = parse_match_data(request.match_data)?;
            valorant_review(&timeline)
        }
        Game::Lol => {
            let timeline: LolTimeline = parse_match_data(request.match_data)?;
            lol_review(&timeline)
                .ok_or_else(|| ApiError::BadRequest("No game data available".to_string()))?
        }
    };

    let metric_lines: Vec<String> = agenda
        .agenda_items
        .iter()
        .map(|item| format!("{}: {}", item.category, item.detail))
        .collect();
    agenda.commentary = Some(
        state
            .enricher
            .commentary(
                CommentaryKind::ReviewSummary,
                "this game review agenda",
                &metric_lines,
            )
            .await,
    );

    Ok(Json(agenda))
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub game: Option<String>,
    pub scenario: Option<ScenarioRequest>,
}

/// Project a hypothetical "what if" scenario.
pub async fn predict_scenario(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<ScenarioPrediction>, ApiError> {
    let game = parse_game(request.game.as_deref())?;
    let scenario = request
        .scenario
        .ok_or_else(|| ApiError::BadRequest("scenario is required".to_string()))?;

    let mut prediction = scenario::predict_scenario(game, &scenario);

    if !prediction.recommendation.is_empty() {
        let metric_lines = vec![
            format!("Scenario: {}", prediction.scenario),
            format!("Analysis: {}", prediction.recommendation),
        ];
        prediction.commentary = Some(
            state
                .enricher
                .commentary(
                    CommentaryKind::ScenarioAnalysis,
                    "this hypothetical scenario",
                    &metric_lines,
                )
                .await,
        );
    }

    Ok(Json(prediction))
}

fn parse_match_data<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("invalid match_data: {e}")))
}
