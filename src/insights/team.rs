//! Team macro analysis and micro-to-macro correlation rules.

use serde::{Deserialize, Serialize};

use crate::calculate::{mean, ratio, round1, round2};
use crate::models::{
    CorrelationFinding, Game, Impact, Insight, MatchPlayerStat, Role, Severity, TeamMatchStat,
};

/// Team rules evaluate the last 10 team records.
const TEAM_WINDOW: usize = 10;

/// Correlation rules average each role's last 5 records.
const ROLE_WINDOW: usize = 5;

/// Objective-control summary over the recent window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveControl {
    pub avg_dragons: f64,
    pub avg_barons: f64,
    /// Percentage, 1 decimal.
    pub first_blood_rate: f64,
}

/// The full analysis returned for a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMacroAnalysis {
    pub team_name: String,
    pub game: Game,
    /// Percentage, 1 decimal.
    pub win_rate: f64,
    pub objective_control: ObjectiveControl,
    pub strategic_insights: Vec<Insight>,
    pub player_macro_connections: Vec<CorrelationFinding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

/// Read-only snapshot the team rules evaluate against. Rates are fractions
/// in [0, 1].
#[derive(Debug, Clone)]
pub struct TeamSnapshot {
    pub win_rate: f64,
    pub avg_dragons: f64,
    pub avg_barons: f64,
    pub first_blood_rate: f64,
}

impl TeamSnapshot {
    /// Build the snapshot from a non-empty window of team records.
    pub fn from_history(history: &[TeamMatchStat]) -> Option<Self> {
        let recent = &history[history.len().saturating_sub(TEAM_WINDOW)..];

        Some(Self {
            win_rate: ratio(recent, |m| m.win)?,
            avg_dragons: mean(&recent.iter().map(|m| m.dragons_secured).collect::<Vec<_>>())?,
            avg_barons: mean(&recent.iter().map(|m| m.barons_secured).collect::<Vec<_>>())?,
            first_blood_rate: ratio(recent, |m| m.first_blood)?,
        })
    }
}

/// Recent averages for one role across the cached player records.
#[derive(Debug, Clone)]
pub struct RoleAverages {
    pub kda: f64,
    pub deaths: f64,
    pub assists: f64,
    pub cs_per_min: f64,
    pub vision: f64,
}

impl RoleAverages {
    fn for_role(player_stats: &[MatchPlayerStat], role: Role) -> Option<Self> {
        let role_stats: Vec<&MatchPlayerStat> =
            player_stats.iter().filter(|s| s.role == role).collect();
        let recent = &role_stats[role_stats.len().saturating_sub(ROLE_WINDOW)..];

        Some(Self {
            kda: mean(&recent.iter().map(|s| s.kda).collect::<Vec<_>>())?,
            deaths: mean(&recent.iter().map(|s| s.deaths as f64).collect::<Vec<_>>())?,
            assists: mean(&recent.iter().map(|s| s.assists as f64).collect::<Vec<_>>())?,
            cs_per_min: mean(&recent.iter().map(|s| s.cs_per_min).collect::<Vec<_>>())?,
            vision: mean(&recent.iter().map(|s| s.vision_score as f64).collect::<Vec<_>>())?,
        })
    }
}

/// Snapshot shared by the correlation rules: team metrics plus per-role
/// averages (absent when a role has no cached records).
#[derive(Debug, Clone)]
pub struct CorrelationSnapshot {
    pub team: TeamSnapshot,
    pub top: Option<RoleAverages>,
    pub jungle: Option<RoleAverages>,
    pub mid: Option<RoleAverages>,
    pub adc: Option<RoleAverages>,
    pub support: Option<RoleAverages>,
}

impl CorrelationSnapshot {
    pub fn new(team: TeamSnapshot, player_stats: &[MatchPlayerStat]) -> Self {
        Self {
            top: RoleAverages::for_role(player_stats, Role::Top),
            jungle: RoleAverages::for_role(player_stats, Role::Jungle),
            mid: RoleAverages::for_role(player_stats, Role::Mid),
            adc: RoleAverages::for_role(player_stats, Role::Adc),
            support: RoleAverages::for_role(player_stats, Role::Support),
            team,
        }
    }
}

/// One entry in the team rule registry.
pub struct TeamRule {
    pub name: &'static str,
    pub eval: fn(&TeamSnapshot) -> Option<Insight>,
}

/// The fixed battery of team macro rules, in evaluation order.
pub fn team_rules() -> &'static [TeamRule] {
    &[
        TeamRule {
            name: "low_win_rate",
            eval: low_win_rate,
        },
        TeamRule {
            name: "low_dragon_control",
            eval: low_dragon_control,
        },
        TeamRule {
            name: "low_first_blood_rate",
            eval: low_first_blood_rate,
        },
    ]
}

fn low_win_rate(snapshot: &TeamSnapshot) -> Option<Insight> {
    if snapshot.win_rate >= 0.45 {
        return None;
    }
    Some(Insight::new(
        Severity::Critical,
        "Win Rate",
        format!(
            "Win rate at {:.1}% - below competitive threshold",
            snapshot.win_rate * 100.0
        ),
        "Schedule strategic review session. Focus on draft phase and early game plans",
    ))
}

fn low_dragon_control(snapshot: &TeamSnapshot) -> Option<Insight> {
    if snapshot.avg_dragons >= 2.0 {
        return None;
    }
    Some(Insight::new(
        Severity::Concern,
        "Objective Priority",
        "Dragon control below optimal level",
        "Improve bot lane priority and jungle pathing around dragon spawn timers",
    ))
}

fn low_first_blood_rate(snapshot: &TeamSnapshot) -> Option<Insight> {
    if snapshot.first_blood_rate >= 0.35 {
        return None;
    }
    Some(Insight::new(
        Severity::Warning,
        "Early Game",
        "Low first blood rate indicates passive early game",
        "Work on level 2-3 power spikes and aggressive lane trading",
    ))
}

/// One entry in the correlation rule registry. Each rule is a conjunction
/// of a role-level pattern and a team-level outcome.
pub struct CorrelationRule {
    pub name: &'static str,
    pub eval: fn(&CorrelationSnapshot) -> Option<CorrelationFinding>,
}

/// The fixed battery of micro-to-macro correlation rules, in evaluation
/// order.
pub fn correlation_rules() -> &'static [CorrelationRule] {
    &[
        CorrelationRule {
            name: "jungle_vision_dragons",
            eval: jungle_vision_dragons,
        },
        CorrelationRule {
            name: "jungle_deaths",
            eval: jungle_deaths,
        },
        CorrelationRule {
            name: "bot_lane_collapse",
            eval: bot_lane_collapse,
        },
        CorrelationRule {
            name: "mid_roam_absence",
            eval: mid_roam_absence,
        },
        CorrelationRule {
            name: "mid_over_roam",
            eval: mid_over_roam,
        },
        CorrelationRule {
            name: "top_island",
            eval: top_island,
        },
    ]
}

fn jungle_vision_dragons(snapshot: &CorrelationSnapshot) -> Option<CorrelationFinding> {
    let jungle = snapshot.jungle.as_ref()?;
    if jungle.vision >= 35.0 || snapshot.team.avg_dragons >= 2.0 {
        return None;
    }
    Some(CorrelationFinding {
        player_role: "Jungle".to_string(),
        issue: "Low vision control correlating with poor dragon control".to_string(),
        micro_pattern: format!("Jungler averaging {:.1} vision score", jungle.vision),
        macro_impact:
            "Limited vision around objectives leading to lost neutral objectives and ambushes"
                .to_string(),
        recommendation:
            "Jungler should prioritize deep wards 1 minute before dragon spawns. Ward enemy jungle entrance and river bushes."
                .to_string(),
        severity: Impact::Critical,
    })
}

fn jungle_deaths(snapshot: &CorrelationSnapshot) -> Option<CorrelationFinding> {
    let jungle = snapshot.jungle.as_ref()?;
    if jungle.kda >= 2.0 {
        return None;
    }
    Some(CorrelationFinding {
        player_role: "Jungle".to_string(),
        issue: "Jungler dying frequently in enemy jungle".to_string(),
        micro_pattern: format!(
            "Jungler KDA {:.2} - likely invading without vision",
            jungle.kda
        ),
        macro_impact:
            "Jungle deaths lead to lost map pressure, stolen camps, and objective disadvantage"
                .to_string(),
        recommendation:
            "Avoid blind invades. Track enemy jungler position. Request lane priority before invading."
                .to_string(),
        severity: Impact::High,
    })
}

fn bot_lane_collapse(snapshot: &CorrelationSnapshot) -> Option<CorrelationFinding> {
    let adc = snapshot.adc.as_ref()?;
    let support = snapshot.support.as_ref()?;
    if adc.deaths < 4.0 || support.vision >= 60.0 {
        return None;
    }
    Some(CorrelationFinding {
        player_role: "Bot Lane".to_string(),
        issue: "ADC high deaths + Support low vision = lost bot priority".to_string(),
        micro_pattern: format!(
            "ADC dying {:.1}x/game, Support {:.0} vision",
            adc.deaths, support.vision
        ),
        macro_impact:
            "Lost bot priority prevents dragon control and loses map pressure for entire team"
                .to_string(),
        recommendation:
            "Support: Ward deeper. ADC: Play safer, respect enemy jungle proximity. Coordinate backs together."
                .to_string(),
        severity: Impact::Critical,
    })
}

fn mid_roam_absence(snapshot: &CorrelationSnapshot) -> Option<CorrelationFinding> {
    let mid = snapshot.mid.as_ref()?;
    if mid.assists >= 4.0 || snapshot.team.first_blood_rate >= 0.35 {
        return None;
    }
    Some(CorrelationFinding {
        player_role: "Mid".to_string(),
        issue: "Low roam presence affecting early game across map".to_string(),
        micro_pattern: format!("Mid averaging {:.1} assists - minimal roaming", mid.assists),
        macro_impact:
            "Mid staying in lane allows enemy mid to roam freely and snowball sidelanes"
                .to_string(),
        recommendation:
            "Coordinate roams with jungler. Push wave then roam on cannon waves. Use TP for bot lane plays."
                .to_string(),
        severity: Impact::Medium,
    })
}

fn mid_over_roam(snapshot: &CorrelationSnapshot) -> Option<CorrelationFinding> {
    let mid = snapshot.mid.as_ref()?;
    if mid.cs_per_min >= 6.5 || mid.assists <= 7.0 {
        return None;
    }
    Some(CorrelationFinding {
        player_role: "Mid".to_string(),
        issue: "Over-roaming sacrificing personal farm and levels".to_string(),
        micro_pattern: format!(
            "Mid low CS ({:.1}/min) but high assists ({:.1})",
            mid.cs_per_min, mid.assists
        ),
        macro_impact:
            "Mid falls behind in gold/XP, reducing team fight impact and creating scaling disadvantage"
                .to_string(),
        recommendation:
            "Balance roaming with farm. Only roam with high-success plays. Fast-push waves before leaving lane."
                .to_string(),
        severity: Impact::Medium,
    })
}

fn top_island(snapshot: &CorrelationSnapshot) -> Option<CorrelationFinding> {
    let top = snapshot.top.as_ref()?;
    if top.kda <= 3.0 || snapshot.team.win_rate >= 0.45 {
        return None;
    }
    Some(CorrelationFinding {
        player_role: "Top".to_string(),
        issue: "Top performing well individually but team still losing".to_string(),
        micro_pattern: format!("Top has good KDA ({:.2}) despite team struggles", top.kda),
        macro_impact:
            "Top lane winning but not translating to map pressure - possible TP timing issues or poor split push decisions"
                .to_string(),
        recommendation:
            "Use TP for bot lane/dragon fights. Apply split push pressure when team is safe. Join team for baron setups."
                .to_string(),
        severity: Impact::Medium,
    })
}

/// Analyze a team's cached history plus the flattened player records.
/// `None` when the team history is empty.
pub fn analyze_team(
    team_name: &str,
    game: Game,
    team_history: &[TeamMatchStat],
    player_stats: &[MatchPlayerStat],
) -> Option<TeamMacroAnalysis> {
    let snapshot = TeamSnapshot::from_history(team_history)?;

    let strategic_insights = team_rules()
        .iter()
        .filter_map(|rule| (rule.eval)(&snapshot))
        .collect();

    let correlation = CorrelationSnapshot::new(snapshot.clone(), player_stats);
    let player_macro_connections = correlation_rules()
        .iter()
        .filter_map(|rule| (rule.eval)(&correlation))
        .collect();

    Some(TeamMacroAnalysis {
        team_name: team_name.to_string(),
        game,
        win_rate: round1(snapshot.win_rate * 100.0),
        objective_control: ObjectiveControl {
            avg_dragons: round1(snapshot.avg_dragons),
            avg_barons: round2(snapshot.avg_barons),
            first_blood_rate: round1(snapshot.first_blood_rate * 100.0),
        },
        strategic_insights,
        player_macro_connections,
        commentary: None,
    })
}
