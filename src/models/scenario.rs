//! Hypothetical-scenario projections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Game;

/// Confidence attached to a scenario projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLabel::Low => write!(f, "low"),
            ConfidenceLabel::Medium => write!(f, "medium"),
            ConfidenceLabel::High => write!(f, "high"),
        }
    }
}

/// A "what if" question plus structured hints about the game state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioRequest {
    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub situation: String,

    pub round: Option<u32>,
    pub score: Option<String>,
    pub site: Option<String>,
    pub time: Option<String>,
    pub weapons: Option<String>,
    pub enemy_utility: Option<String>,

    pub timestamp: Option<String>,
    pub gold_diff: Option<i32>,
    pub level_diff: Option<f64>,
    pub vision: Option<String>,
    pub soul_point: Option<bool>,
    #[serde(default)]
    pub other_objectives: Vec<String>,
}

/// Modeled outcome of one candidate action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionProjection {
    pub action: String,
    /// Raw probability; also surfaced verbatim in the narrative text.
    pub success_probability: f64,
    pub expected_value: String,
    pub outcome: String,
}

/// Result of projecting a hypothetical scenario.
///
/// Both projections are absent when no template matched the situation text;
/// that signals "no applicable heuristic", not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPrediction {
    pub scenario: String,
    pub game: Game,
    pub game_state: BTreeMap<String, String>,
    pub original_action: Option<ActionProjection>,
    pub alternative_action: Option<ActionProjection>,
    pub recommendation: String,
    pub confidence: ConfidenceLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

impl ScenarioPrediction {
    /// Empty skeleton for an unmatched scenario.
    pub fn skeleton(scenario: impl Into<String>, game: Game) -> Self {
        Self {
            scenario: scenario.into(),
            game,
            game_state: BTreeMap::new(),
            original_action: None,
            alternative_action: None,
            recommendation: String::new(),
            confidence: ConfidenceLabel::Medium,
            commentary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_default_is_medium() {
        assert_eq!(ConfidenceLabel::default(), ConfidenceLabel::Medium);
    }

    #[test]
    fn test_skeleton_has_no_projections() {
        let p = ScenarioPrediction::skeleton("unmapped question", Game::Valorant);
        assert!(p.original_action.is_none());
        assert!(p.alternative_action.is_none());
        assert_eq!(p.confidence, ConfidenceLabel::Medium);
    }

    #[test]
    fn test_request_deserializes_with_partial_hints() {
        let json = r#"{
            "question": "Contest drake at 24:15?",
            "gold_diff": -2500,
            "vision": "poor"
        }"#;
        let req: ScenarioRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.gold_diff, Some(-2500));
        assert_eq!(req.vision.as_deref(), Some("poor"));
        assert!(req.other_objectives.is_empty());
    }
}
