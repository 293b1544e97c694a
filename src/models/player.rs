//! Per-player match records.

use serde::{Deserialize, Serialize};

use super::Game;
use crate::calculate;

/// Player role on a MOBA roster.
///
/// VALORANT rosters carry free-form role strings; anything outside the five
/// MOBA positions deserializes to `Other` so the record is kept while the
/// role-gated rules simply skip it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String")]
pub enum Role {
    Top,
    Jungle,
    Mid,
    #[serde(rename = "ADC")]
    Adc,
    Support,
    #[default]
    Other,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "top" => Role::Top,
            "jungle" => Role::Jungle,
            "mid" => Role::Mid,
            "adc" => Role::Adc,
            "support" => Role::Support,
            _ => Role::Other,
        }
    }
}

impl Role {
    /// Roles whose income depends on creep score (farm-efficiency rules).
    pub fn is_cs_dependent(&self) -> bool {
        matches!(self, Role::Adc | Role::Mid | Role::Top)
    }

    /// Roles responsible for vision control.
    pub fn is_vision_role(&self) -> bool {
        matches!(self, Role::Jungle | Role::Support)
    }

    /// Primary damage carries.
    pub fn is_carry(&self) -> bool {
        matches!(self, Role::Adc | Role::Mid)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Adc => "ADC",
            Role::Support => "Support",
            Role::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// One player's performance in one game.
///
/// Immutable after creation; retained in a bounded rolling window per
/// player key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchPlayerStat {
    pub player_name: String,
    pub match_id: String,
    pub game_number: u32,
    pub game: Game,
    pub role: Role,
    pub champion: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// (kills + assists) / deaths, rounded to 2 decimals.
    pub kda: f64,
    pub cs_per_min: f64,
    pub vision_score: u32,
    pub damage_dealt: u32,
    pub gold_earned: u32,
    /// Weighted 0-100 composite of KDA, damage, CS rate and vision.
    pub performance_score: f64,
}

impl MatchPlayerStat {
    /// Build a record from raw counters, deriving KDA, CS/min and the
    /// performance score.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        player_name: String,
        match_id: String,
        game_number: u32,
        game: Game,
        role: Role,
        champion: String,
        kills: u32,
        deaths: u32,
        assists: u32,
        minions_killed: u32,
        vision_score: u32,
        damage_dealt: u32,
        gold_earned: u32,
        duration_secs: u32,
    ) -> Self {
        let kda = calculate::kda(kills, deaths, assists);
        let cs_per_min = calculate::cs_per_min(minions_killed, duration_secs);
        let performance_score = calculate::performance_score(
            kills,
            deaths,
            assists,
            damage_dealt,
            minions_killed,
            vision_score,
            duration_secs,
        );

        Self {
            player_name,
            match_id,
            game_number,
            game,
            role,
            champion,
            kills,
            deaths,
            assists,
            kda,
            cs_per_min,
            vision_score,
            damage_dealt,
            gold_earned,
            performance_score,
        }
    }
}
