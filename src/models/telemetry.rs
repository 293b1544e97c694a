//! Upstream telemetry payload shapes.
//!
//! Mirrors the GRID end-state and series-listing responses. Every field is
//! defaulted so a partially populated payload still deserializes; the
//! derivation layer decides what counts as usable.

use serde::{Deserialize, Serialize};

use super::Role;

fn default_duration() -> u32 {
    1800
}

/// Full end state of a series: one entry per game played.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesState {
    #[serde(default)]
    pub games: Vec<GameState>,
}

/// One game within a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Game duration in seconds.
    #[serde(default = "default_duration")]
    pub game_duration: u32,

    #[serde(default)]
    pub teams: Vec<TeamState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            game_duration: default_duration(),
            teams: Vec::new(),
        }
    }
}

/// One team's slice of a game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamState {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub stats: TeamCounters,

    #[serde(default)]
    pub players: Vec<PlayerState>,
}

/// Raw team counters for a single game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCounters {
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub dragons: u32,
    #[serde(default)]
    pub barons: u32,
    #[serde(default)]
    pub towers: u32,
    #[serde(default)]
    pub win: bool,
    #[serde(default)]
    pub first_blood: bool,
}

/// One player's slice of a game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default, alias = "summonerName")]
    pub name: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default, alias = "championName")]
    pub champion: String,

    #[serde(default)]
    pub stats: PlayerCounters,
}

/// Raw player counters for a single game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCounters {
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub total_minions_killed: u32,
    #[serde(default)]
    pub vision_score: u32,
    #[serde(default)]
    pub total_damage_dealt_to_champions: u32,
    #[serde(default)]
    pub gold_earned: u32,
}

/// A series reference from the listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRef {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_name: Option<String>,
}

/// Series metadata from the details query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesDetails {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,

    #[serde(default)]
    pub teams: Vec<String>,
}
