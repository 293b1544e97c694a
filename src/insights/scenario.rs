//! Hypothetical-scenario projection.
//!
//! Keyword-matched templates with fixed base-rate probabilities from
//! domain priors. At most one multiplicative adjustment applies per
//! template, and the recommendation narrative surfaces the exact computed
//! probabilities.

use crate::format_thousands;
use crate::models::{
    ActionProjection, ConfidenceLabel, Game, ScenarioPrediction, ScenarioRequest,
};

/// 3v5 retakes rarely succeed.
pub const RETAKE_3V5_BASE: f64 = 0.15;

/// Win rate of the following gun round with rifles saved.
pub const FULL_BUY_BASE: f64 = 0.60;

/// Win rate of the following round on a broken buy.
pub const ECO_BASE: f64 = 0.35;

/// Credit value of one rifle.
pub const RIFLE_COST: u32 = 2900;

/// Base probability of winning a drake contest from a gold deficit.
pub const DRAKE_FIGHT_BASE: f64 = 0.22;

/// Multiplier applied to the fight probability under poor vision.
pub const POOR_VISION_PENALTY: f64 = 0.8;

/// Probability of converting the concede into tower gold.
pub const TOWER_TRADE_PROB: f64 = 0.85;

/// Project a hypothetical scenario. Unmatched situations return the
/// skeleton with empty projections and medium confidence.
pub fn predict_scenario(game: Game, request: &ScenarioRequest) -> ScenarioPrediction {
    match game {
        Game::Valorant => predict_valorant(request),
        Game::Lol => predict_lol(request),
    }
}

fn predict_valorant(request: &ScenarioRequest) -> ScenarioPrediction {
    let mut prediction = ScenarioPrediction::skeleton(request.question.clone(), Game::Valorant);

    let situation = request.situation.to_lowercase();
    if !(situation.contains("retake") && situation.contains("3v5")) {
        return prediction;
    }

    prediction.game_state.insert(
        "players_alive".to_string(),
        "3v5 disadvantage".to_string(),
    );
    prediction.game_state.insert(
        "site".to_string(),
        request.site.clone().unwrap_or_else(|| "C".to_string()),
    );
    prediction.game_state.insert(
        "time_remaining".to_string(),
        request.time.clone().unwrap_or_else(|| "unknown".to_string()),
    );
    prediction.game_state.insert(
        "weapons".to_string(),
        request
            .weapons
            .clone()
            .unwrap_or_else(|| "3 rifles".to_string()),
    );
    prediction.game_state.insert(
        "enemy_utility".to_string(),
        request
            .enemy_utility
            .clone()
            .unwrap_or_else(|| "likely full".to_string()),
    );

    let save_value = 3 * RIFLE_COST;

    prediction.original_action = Some(ActionProjection {
        action: "Attempt 3v5 retake".to_string(),
        success_probability: RETAKE_3V5_BASE,
        expected_value: "Low - likely lose round and weapons".to_string(),
        outcome: "Lost round, lost 3 rifles".to_string(),
    });

    prediction.alternative_action = Some(ActionProjection {
        action: "Save 3 rifles".to_string(),
        success_probability: FULL_BUY_BASE,
        expected_value: format!(
            "High - {:.0}% chance to win next gun round vs {:.0}% on eco",
            FULL_BUY_BASE * 100.0,
            ECO_BASE * 100.0
        ),
        outcome: "Concede round, maintain weapon economy for next".to_string(),
    });

    prediction.recommendation = format!(
        "Saving was the superior strategic choice. The 3v5 retake had only {:.0}% probability \
         of success. Saving 3 rifles ({} credits) gives a {:.0}% chance to win the following \
         gun round, versus {:.0}% on a broken buy. Expected value strongly favors the save.",
        RETAKE_3V5_BASE * 100.0,
        format_thousands(save_value as u64),
        FULL_BUY_BASE * 100.0,
        ECO_BASE * 100.0
    );
    prediction.confidence = ConfidenceLabel::High;

    prediction
}

fn predict_lol(request: &ScenarioRequest) -> ScenarioPrediction {
    let mut prediction = ScenarioPrediction::skeleton(request.question.clone(), Game::Lol);

    if !request.question.to_lowercase().contains("drake") {
        return prediction;
    }

    let vision = request.vision.clone().unwrap_or_else(|| "poor".to_string());
    let gold_diff = request.gold_diff.unwrap_or(-2500);
    let objectives = if request.other_objectives.is_empty() {
        vec!["mid T2".to_string(), "bot T2".to_string()]
    } else {
        request.other_objectives.clone()
    };

    prediction.game_state.insert(
        "timestamp".to_string(),
        request
            .timestamp
            .clone()
            .unwrap_or_else(|| "24:15".to_string()),
    );
    prediction
        .game_state
        .insert("gold_difference".to_string(), gold_diff.to_string());
    prediction.game_state.insert(
        "level_difference".to_string(),
        request.level_diff.unwrap_or(-1.5).to_string(),
    );
    prediction
        .game_state
        .insert("vision_control".to_string(), vision.clone());
    prediction.game_state.insert(
        "dragon_soul_point".to_string(),
        request.soul_point.unwrap_or(false).to_string(),
    );
    prediction
        .game_state
        .insert("available_objectives".to_string(), objectives.join(", "));

    let mut fight_win_prob = DRAKE_FIGHT_BASE;
    if vision == "poor" {
        fight_win_prob *= POOR_VISION_PENALTY;
    }
    let secure_prob = fight_win_prob * 0.9;

    prediction.original_action = Some(ActionProjection {
        action: "Contest the drake".to_string(),
        success_probability: fight_win_prob,
        expected_value: format!(
            "{:.0}% fight win, {:.0}% objective secure - high risk of team wipe with no objective",
            fight_win_prob * 100.0,
            secure_prob * 100.0
        ),
        outcome: "All 5 dead, enemy secures drake + 2 towers, +200 XP/player, baron setup"
            .to_string(),
    });

    let mut benefits: Vec<String> = Vec::new();
    if objectives.iter().any(|o| o == "mid T2") {
        benefits.push("Take mid T2 tower (500g + map control)".to_string());
    }
    if objectives.iter().any(|o| o == "bot T2") {
        benefits.push("Take bot T2 tower (500g)".to_string());
    }
    benefits.push("Maintain team positioning".to_string());
    benefits.push("Farm safely, reduce gold gap".to_string());

    prediction.alternative_action = Some(ActionProjection {
        action: "Concede drake and trade for towers".to_string(),
        success_probability: TOWER_TRADE_PROB,
        expected_value: benefits.join("; "),
        outcome: "Low risk - enemy gets drake but team gains towers and safety. +1000g from towers vs -500g from lost fight"
            .to_string(),
    });

    prediction.recommendation = format!(
        "Conceding the drake was the correct strategic choice. With {:.0}% win probability, \
         contesting risks a team wipe for minimal gain. Instead, trading for 2 towers \
         ({:.0}% probability, ~1000g) maintains gold pace and prevents a snowball. The drake, \
         while valuable, is not worth the risk of losing the game on a bad fight. Preserve \
         resources, take objectives safely, and look for better fight opportunities.",
        fight_win_prob * 100.0,
        TOWER_TRADE_PROB * 100.0
    );
    prediction.confidence = ConfidenceLabel::High;

    prediction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retake_template_base_rates() {
        let request = ScenarioRequest {
            question: "Should we have saved instead?".to_string(),
            situation: "3v5 retake".to_string(),
            site: Some("C".to_string()),
            ..Default::default()
        };

        let prediction = predict_scenario(Game::Valorant, &request);

        let original = prediction.original_action.unwrap();
        let alternative = prediction.alternative_action.unwrap();

        // Base rates, unmodified
        assert_eq!(original.success_probability, RETAKE_3V5_BASE);
        assert_eq!(alternative.success_probability, FULL_BUY_BASE);
        assert_eq!(prediction.confidence, ConfidenceLabel::High);

        // Narrative surfaces the exact computed probabilities
        assert!(prediction.recommendation.contains("15%"));
        assert!(prediction.recommendation.contains("60%"));
        assert!(prediction.recommendation.contains("8,700 credits"));
    }

    #[test]
    fn test_unmatched_valorant_scenario_returns_skeleton() {
        let request = ScenarioRequest {
            question: "Was the mid push correct?".to_string(),
            situation: "5v4 post-plant".to_string(),
            ..Default::default()
        };

        let prediction = predict_scenario(Game::Valorant, &request);
        assert!(prediction.original_action.is_none());
        assert!(prediction.alternative_action.is_none());
        assert_eq!(prediction.confidence, ConfidenceLabel::Medium);
    }

    #[test]
    fn test_drake_template_applies_vision_penalty() {
        let request = ScenarioRequest {
            question: "Contest drake at 24:15 with everybody dying?".to_string(),
            vision: Some("poor".to_string()),
            ..Default::default()
        };

        let prediction = predict_scenario(Game::Lol, &request);
        let original = prediction.original_action.unwrap();

        // 0.22 * 0.8
        assert!((original.success_probability - 0.176).abs() < 1e-9);
        assert!(prediction.recommendation.contains("18%"));
        assert_eq!(prediction.confidence, ConfidenceLabel::High);
    }

    #[test]
    fn test_drake_template_without_penalty() {
        let request = ScenarioRequest {
            question: "Was the drake contest right?".to_string(),
            vision: Some("good".to_string()),
            ..Default::default()
        };

        let prediction = predict_scenario(Game::Lol, &request);
        let original = prediction.original_action.unwrap();
        assert_eq!(original.success_probability, DRAKE_FIGHT_BASE);

        let alternative = prediction.alternative_action.unwrap();
        assert_eq!(alternative.success_probability, TOWER_TRADE_PROB);
    }

    #[test]
    fn test_unmatched_lol_scenario_returns_skeleton() {
        let request = ScenarioRequest {
            question: "Should we have started baron?".to_string(),
            ..Default::default()
        };

        let prediction = predict_scenario(Game::Lol, &request);
        assert!(prediction.original_action.is_none());
        assert_eq!(prediction.confidence, ConfidenceLabel::Medium);
    }

    #[test]
    fn test_objective_benefits_reflect_hints() {
        let request = ScenarioRequest {
            question: "drake contest".to_string(),
            other_objectives: vec!["bot T2".to_string()],
            ..Default::default()
        };

        let prediction = predict_scenario(Game::Lol, &request);
        let alternative = prediction.alternative_action.unwrap();
        assert!(alternative.expected_value.contains("bot T2"));
        assert!(!alternative.expected_value.contains("mid T2"));
    }

}
