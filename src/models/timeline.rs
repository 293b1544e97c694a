//! Request-scoped match timelines for the assistant endpoints.
//!
//! These payloads arrive with the request (a concluded match exported from
//! the stats provider) rather than from the rolling caches.

use serde::{Deserialize, Serialize};

use super::{PlayerCounters, Role};

fn default_true() -> bool {
    true
}

fn default_duration() -> u32 {
    1800
}

fn default_time_remaining() -> u32 {
    30
}

// ── VALORANT ────────────────────────────────────────────────────

/// A concluded VALORANT match, round by round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValorantTimeline {
    #[serde(default)]
    pub match_id: String,

    #[serde(default)]
    pub match_type: String,

    #[serde(default)]
    pub opponent: String,

    #[serde(default)]
    pub map: String,

    #[serde(default)]
    pub final_score: String,

    #[serde(default)]
    pub rounds: Vec<ValorantRound>,

    #[serde(default)]
    pub team_orbs_collected: u32,

    #[serde(default)]
    pub enemy_orbs_collected: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValorantRound {
    #[serde(default)]
    pub round_num: u32,

    /// "attackers" or "defenders".
    #[serde(default)]
    pub won_by: String,

    #[serde(default)]
    pub attackers: Vec<ValorantRoundPlayer>,

    #[serde(default)]
    pub defenders: Vec<ValorantRoundPlayer>,

    pub attackers_team_name: Option<String>,
    pub defenders_team_name: Option<String>,

    /// Whether the reviewing team took the round.
    #[serde(default)]
    pub team_won: bool,

    /// "full", "force", "eco".
    pub buy_type: Option<String>,

    /// Seconds left on the clock when the round was decided.
    #[serde(default = "default_time_remaining")]
    pub time_remaining: u32,

    pub target_site: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValorantRoundPlayer {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub kills: u32,

    #[serde(default)]
    pub deaths: u32,

    /// Kill, Assist, Survival or Trade contribution this round.
    #[serde(default = "default_true")]
    pub kast: bool,

    #[serde(default)]
    pub first_death: bool,
}

// ── League of Legends ───────────────────────────────────────────

/// A concluded LoL series with its event log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LolTimeline {
    #[serde(default)]
    pub series_id: String,

    #[serde(default)]
    pub tournament: String,

    #[serde(default)]
    pub teams: Vec<String>,

    #[serde(default)]
    pub games: Vec<LolTimelineGame>,

    #[serde(default)]
    pub events: LolEvents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LolTimelineGame {
    /// Game duration in seconds.
    #[serde(default = "default_duration")]
    pub duration: u32,

    #[serde(default)]
    pub blue_team: LolTimelineSide,

    #[serde(default)]
    pub red_team: LolTimelineSide,
}

impl Default for LolTimelineGame {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            blue_team: LolTimelineSide::default(),
            red_team: LolTimelineSide::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LolTimelineSide {
    #[serde(default)]
    pub players: Vec<LolTimelinePlayer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LolTimelinePlayer {
    #[serde(default, alias = "summonerName")]
    pub name: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub stats: PlayerCounters,
}

/// Curated event log attached to a LoL series export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LolEvents {
    #[serde(default)]
    pub ganks: Vec<GankEvent>,

    pub first_drake: Option<FirstDrake>,

    #[serde(default)]
    pub baron_fights: Vec<BaronFight>,

    #[serde(default)]
    pub isolated_deaths: Vec<IsolatedDeath>,

    #[serde(default)]
    pub teleport_uses: Vec<TeleportUse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GankEvent {
    #[serde(default)]
    pub jungler: String,

    /// "top", "mid", "bot", "dragon".
    #[serde(default)]
    pub lane: String,

    /// In-game seconds.
    #[serde(default)]
    pub timestamp: u32,

    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirstDrake {
    #[serde(default = "default_true")]
    pub secured: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaronFight {
    /// "won" or "lost".
    #[serde(default)]
    pub result: String,

    #[serde(default)]
    pub unspent_gold: u32,

    #[serde(default)]
    pub timestamp: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IsolatedDeath {
    #[serde(default)]
    pub player: String,

    #[serde(default)]
    pub location: String,

    pub objective: Option<String>,

    #[serde(default)]
    pub timestamp: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeleportUse {
    #[serde(default = "default_true")]
    pub successful: bool,

    /// "flank", "defensive", etc.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub timestamp: u32,
}
