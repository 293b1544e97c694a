//! Route handlers.

pub mod assistant;
pub mod dashboard;
pub mod players;
pub mod series;
pub mod team;

use axum::Json;
use serde::Serialize;

use crate::api::ApiError;
use crate::models::Game;

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
}

/// Service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Assistant Coach API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Parse an optional game name, defaulting to LoL (the reference behavior
/// for the assistant endpoints).
pub(crate) fn parse_game(value: Option<&str>) -> Result<Game, ApiError> {
    match value {
        None => Ok(Game::Lol),
        Some(s) => Game::parse(s).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "Invalid game '{s}'. Must be 'lol', 'league', or 'valorant'"
            ))
        }),
    }
}
