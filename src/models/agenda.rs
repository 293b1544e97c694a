//! Post-match review agendas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Game;

/// Status tag on an agenda item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgendaStatus {
    WonBoth,
    LostBoth,
    Split,
    Strong,
    Concern,
    Critical,
}

impl std::fmt::Display for AgendaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AgendaStatus::WonBoth => "won_both",
            AgendaStatus::LostBoth => "lost_both",
            AgendaStatus::Split => "split",
            AgendaStatus::Strong => "strong",
            AgendaStatus::Concern => "concern",
            AgendaStatus::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// One discussion point on the review agenda.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaItem {
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgendaStatus>,

    /// "MM:SS" in-game time, or a label like "Game-wide".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    pub detail: String,
    pub notes: String,
}

impl AgendaItem {
    pub fn new(category: impl Into<String>, detail: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            status: None,
            timestamp: None,
            detail: detail.into(),
            notes: notes.into(),
        }
    }

    pub fn with_status(mut self, status: AgendaStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// An ordered review agenda for one concluded match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAgenda {
    pub id: Uuid,
    pub match_id: String,
    pub game: Game,
    pub generated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub teams: Vec<String>,

    pub agenda_items: Vec<AgendaItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

impl ReviewAgenda {
    pub fn new(match_id: impl Into<String>, game: Game) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id: match_id.into(),
            game,
            generated_at: Utc::now(),
            match_type: None,
            opponent: None,
            map: None,
            final_score: None,
            tournament: None,
            teams: Vec::new(),
            agenda_items: Vec::new(),
            commentary: None,
        }
    }
}
