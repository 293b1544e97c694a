//! Per-player performance analysis.

use serde::{Deserialize, Serialize};

use crate::calculate::{self, mean, round1, round2};
use crate::insights::mistakes;
use crate::models::{Game, Insight, MatchPlayerStat, RecurringMistake, Role, Severity, Trend};

/// Window sizes: averages over the last 5 games, trends over the last 10.
const AVERAGE_WINDOW: usize = 5;
const TREND_WINDOW: usize = 10;

/// Averages over the player's most recent games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentAverages {
    pub kda: f64,
    pub cs_per_min: f64,
    pub vision_score: f64,
}

/// Trend classifications over the player's recent window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummary {
    pub kda_trend: Trend,
    pub performance_trend: Trend,
}

/// The full analysis returned for a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerAnalysis {
    pub player_name: String,
    pub game: Game,
    pub recent_averages: RecentAverages,
    pub trends: TrendSummary,
    pub insights: Vec<Insight>,
    pub recurring_mistakes: Vec<RecurringMistake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

/// Read-only snapshot the player rules evaluate against.
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    pub role: Role,
    pub avg_kda: f64,
    pub avg_cs_per_min: f64,
    pub avg_vision: f64,
    pub kda_trend: Trend,
    pub performance_trend: Trend,
}

impl PlayerSnapshot {
    /// Build the snapshot from a non-empty history window (oldest first).
    /// Role gating uses the most recent record's role.
    pub fn from_history(history: &[MatchPlayerStat]) -> Option<Self> {
        let last = history.last()?;

        let recent = tail(history, AVERAGE_WINDOW);
        let avg_kda = mean(&collect(recent, |s| s.kda))?;
        let avg_cs_per_min = mean(&collect(recent, |s| s.cs_per_min))?;
        let avg_vision = mean(&collect(recent, |s| s.vision_score as f64))?;

        let trend_slice = tail(history, TREND_WINDOW);
        let kda_trend = calculate::trend(&collect(trend_slice, |s| s.kda));
        let performance_trend = calculate::trend(&collect(trend_slice, |s| s.performance_score));

        Some(Self {
            role: last.role,
            avg_kda,
            avg_cs_per_min,
            avg_vision,
            kda_trend,
            performance_trend,
        })
    }
}

/// One entry in the player rule registry.
pub struct PlayerRule {
    pub name: &'static str,
    pub eval: fn(&PlayerSnapshot) -> Option<Insight>,
}

/// The fixed battery of player rules, in evaluation order.
pub fn player_rules() -> &'static [PlayerRule] {
    &[
        PlayerRule {
            name: "low_kda",
            eval: low_kda,
        },
        PlayerRule {
            name: "low_vision",
            eval: low_vision,
        },
        PlayerRule {
            name: "kda_trend",
            eval: kda_trend_direction,
        },
    ]
}

fn low_kda(snapshot: &PlayerSnapshot) -> Option<Insight> {
    if snapshot.avg_kda >= 2.5 {
        return None;
    }
    Some(Insight::new(
        Severity::Concern,
        "Combat",
        format!(
            "KDA below optimal threshold. Current: {:.2}",
            snapshot.avg_kda
        ),
        "Focus on positioning in team fights and reducing unnecessary deaths",
    ))
}

fn low_vision(snapshot: &PlayerSnapshot) -> Option<Insight> {
    if snapshot.avg_vision >= 30.0 || !snapshot.role.is_vision_role() {
        return None;
    }
    Some(Insight::new(
        Severity::Concern,
        "Vision Control",
        format!(
            "Vision score needs improvement. Current: {:.1}",
            snapshot.avg_vision
        ),
        "Increase ward placement frequency, especially before objectives",
    ))
}

fn kda_trend_direction(snapshot: &PlayerSnapshot) -> Option<Insight> {
    match snapshot.kda_trend {
        Trend::Declining => Some(Insight::new(
            Severity::Warning,
            "Performance Trend",
            "KDA showing declining trend over last 10 games",
            "Review recent VODs for recurring mistakes in decision-making",
        )),
        Trend::Improving => Some(Insight::new(
            Severity::Positive,
            "Performance Trend",
            "KDA showing improvement trend - keep up the momentum",
            "Continue current practice regimen",
        )),
        _ => None,
    }
}

/// Analyze a player's cached history. `None` when the history is empty
/// (the caller surfaces that as the distinct no-local-data outcome).
pub fn analyze_player(
    player_name: &str,
    game: Game,
    history: &[MatchPlayerStat],
) -> Option<PlayerAnalysis> {
    let snapshot = PlayerSnapshot::from_history(history)?;

    let insights = player_rules()
        .iter()
        .filter_map(|rule| (rule.eval)(&snapshot))
        .collect();

    Some(PlayerAnalysis {
        player_name: player_name.to_string(),
        game,
        recent_averages: RecentAverages {
            kda: round2(snapshot.avg_kda),
            cs_per_min: round1(snapshot.avg_cs_per_min),
            vision_score: round1(snapshot.avg_vision),
        },
        trends: TrendSummary {
            kda_trend: snapshot.kda_trend,
            performance_trend: snapshot.performance_trend,
        },
        insights,
        recurring_mistakes: mistakes::detect_recurring_mistakes(history),
        commentary: None,
    })
}

fn tail<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}

fn collect(stats: &[MatchPlayerStat], f: impl Fn(&MatchPlayerStat) -> f64) -> Vec<f64> {
    stats.iter().map(f).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(kills: u32, deaths: u32, assists: u32, vision: u32, role: Role) -> MatchPlayerStat {
        MatchPlayerStat::new(
            "Vulcan".to_string(),
            "m-1".to_string(),
            1,
            Game::Lol,
            role,
            "Rakan".to_string(),
            kills,
            deaths,
            assists,
            40,
            vision,
            8000,
            9000,
            1800,
        )
    }

    #[test]
    fn test_empty_history_is_none() {
        assert!(analyze_player("Vulcan", Game::Lol, &[]).is_none());
    }

    #[test]
    fn test_low_kda_rule_fires() {
        let history = vec![stat(1, 5, 2, 50, Role::Support); 5];
        let analysis = analyze_player("Vulcan", Game::Lol, &history).unwrap();

        assert!(analysis
            .insights
            .iter()
            .any(|i| i.category == "Combat" && i.severity == Severity::Concern));
    }

    #[test]
    fn test_low_kda_rule_does_not_fire_on_good_kda() {
        let history = vec![stat(5, 1, 5, 50, Role::Support); 5];
        let analysis = analyze_player("Vulcan", Game::Lol, &history).unwrap();

        assert!(!analysis.insights.iter().any(|i| i.category == "Combat"));
    }

    #[test]
    fn test_vision_rule_gated_to_vision_roles() {
        let support_history = vec![stat(2, 2, 8, 20, Role::Support); 5];
        let analysis = analyze_player("Vulcan", Game::Lol, &support_history).unwrap();
        assert!(analysis
            .insights
            .iter()
            .any(|i| i.category == "Vision Control"));

        // Same numbers on a Mid laner: rule stays silent
        let mid_history = vec![stat(2, 2, 8, 20, Role::Mid); 5];
        let analysis = analyze_player("Jojopyun", Game::Lol, &mid_history).unwrap();
        assert!(!analysis
            .insights
            .iter()
            .any(|i| i.category == "Vision Control"));
    }

    #[test]
    fn test_declining_trend_emits_warning() {
        let mut history: Vec<MatchPlayerStat> = (0..5)
            .map(|_| stat(8, 1, 8, 60, Role::Jungle))
            .collect();
        history.extend((0..5).map(|_| stat(1, 5, 1, 60, Role::Jungle)));

        let analysis = analyze_player("Blaber", Game::Lol, &history).unwrap();
        assert_eq!(analysis.trends.kda_trend, Trend::Declining);
        assert!(analysis
            .insights
            .iter()
            .any(|i| i.category == "Performance Trend" && i.severity == Severity::Warning));
    }

    #[test]
    fn test_improving_trend_emits_positive() {
        let mut history: Vec<MatchPlayerStat> = (0..5)
            .map(|_| stat(1, 5, 1, 60, Role::Jungle))
            .collect();
        history.extend((0..5).map(|_| stat(8, 1, 8, 60, Role::Jungle)));

        let analysis = analyze_player("Blaber", Game::Lol, &history).unwrap();
        assert!(analysis
            .insights
            .iter()
            .any(|i| i.severity == Severity::Positive));
    }

    #[test]
    fn test_rules_are_non_exclusive() {
        // Low KDA and low vision on a Support both fire at once
        let history = vec![stat(0, 6, 2, 15, Role::Support); 5];
        let analysis = analyze_player("Vulcan", Game::Lol, &history).unwrap();

        let categories: Vec<&str> = analysis
            .insights
            .iter()
            .map(|i| i.category.as_str())
            .collect();
        assert!(categories.contains(&"Combat"));
        assert!(categories.contains(&"Vision Control"));
    }

    #[test]
    fn test_short_history_reports_insufficient_trend() {
        let history = vec![stat(3, 2, 4, 40, Role::Mid); 2];
        let analysis = analyze_player("Jojopyun", Game::Lol, &history).unwrap();
        assert_eq!(analysis.trends.kda_trend, Trend::InsufficientData);
    }

    #[test]
    fn test_recent_averages_rounding() {
        let history = vec![stat(3, 2, 5, 45, Role::Mid); 5];
        let analysis = analyze_player("Jojopyun", Game::Lol, &history).unwrap();
        assert_eq!(analysis.recent_averages.kda, 4.0);
        assert_eq!(analysis.recent_averages.vision_score, 45.0);
    }
}
