//! Match-scoped personalized player insights.
//!
//! Unlike the rolling-window analysis, these operate on a single concluded
//! match supplied with the request, surfacing data-backed findings with the
//! numbers that support them.

use serde::{Deserialize, Serialize};

use crate::format_thousands;
use crate::models::{Game, Impact, LolTimeline, Role, ValorantTimeline};

/// A metric surfaced with its supporting numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPoint {
    pub metric: String,
    pub value: String,
    pub context: String,
}

/// A data-backed finding about the player's match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchFinding {
    pub severity: Impact,
    pub finding: String,
    pub explanation: String,
}

/// An actionable follow-up tied to a finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicRecommendation {
    pub priority: Impact,
    pub recommendation: String,
    pub action: String,
}

/// Personalized insight bundle for one player in one match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizedInsights {
    pub player_name: String,
    pub game: Game,
    pub data_points: Vec<DataPoint>,
    pub insights: Vec<MatchFinding>,
    pub strategic_recommendations: Vec<StrategicRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

impl PersonalizedInsights {
    fn new(player_name: &str, game: Game) -> Self {
        Self {
            player_name: player_name.to_string(),
            game,
            data_points: Vec::new(),
            insights: Vec::new(),
            strategic_recommendations: Vec::new(),
            commentary: None,
        }
    }
}

struct PlayerRound {
    won: bool,
    has_kast: bool,
    deaths: u32,
    first_death: bool,
}

/// Analyze one player's VALORANT match round by round.
/// `None` when the player does not appear in the match data.
pub fn valorant_player_insights(
    player_name: &str,
    timeline: &ValorantTimeline,
) -> Option<PersonalizedInsights> {
    let mut player_rounds: Vec<PlayerRound> = Vec::new();
    let mut team_name: Option<String> = None;

    for round in &timeline.rounds {
        let sides = [
            ("attackers", &round.attackers, &round.attackers_team_name),
            ("defenders", &round.defenders, &round.defenders_team_name),
        ];
        for (side, players, side_team_name) in sides {
            for player in players.iter() {
                if player.name.eq_ignore_ascii_case(player_name) {
                    player_rounds.push(PlayerRound {
                        won: round.won_by == side,
                        has_kast: player.kast,
                        deaths: player.deaths,
                        first_death: player.first_death,
                    });
                    if team_name.is_none() {
                        team_name.clone_from(side_team_name);
                    }
                }
            }
        }
    }

    if player_rounds.is_empty() {
        return None;
    }

    let mut insights = PersonalizedInsights::new(player_name, Game::Valorant);
    let total_rounds = player_rounds.len();
    let team = team_name.unwrap_or_else(|| "Team".to_string());

    // Rounds where the player died without any KAST contribution
    let died_no_kast: Vec<&PlayerRound> = player_rounds
        .iter()
        .filter(|r| r.deaths > 0 && !r.has_kast)
        .collect();
    if !died_no_kast.is_empty() {
        let lost = died_no_kast.iter().filter(|r| !r.won).count();
        let loss_rate = lost as f64 / died_no_kast.len() as f64 * 100.0;

        insights.data_points.push(DataPoint {
            metric: "Death without KAST Impact".to_string(),
            value: format!(
                "{lost}/{} rounds lost ({loss_rate:.0}%)",
                died_no_kast.len()
            ),
            context: format!(
                "{team} loses {loss_rate:.0}% of rounds when {player_name} dies without KAST"
            ),
        });

        if loss_rate >= 70.0 {
            insights.insights.push(MatchFinding {
                severity: Impact::Critical,
                finding: format!(
                    "{player_name}'s deaths without KAST heavily impact team success ({loss_rate:.0}% round loss rate)"
                ),
                explanation:
                    "Dying 'for free' (no Kill, Assist, Survival, or Trade) creates 4v5 situations with no value gained"
                        .to_string(),
            });
            insights.strategic_recommendations.push(StrategicRecommendation {
                priority: Impact::High,
                recommendation: format!(
                    "Strategy must ensure {player_name} is always positioned for KAST"
                ),
                action:
                    "If death occurs, it must be for a trade, kill, or assist. Review positioning in opening duels."
                        .to_string(),
            });
        }
    }

    // Opening duel performance
    let first_deaths = player_rounds.iter().filter(|r| r.first_death).count();
    if first_deaths > 0 {
        let first_death_rate = first_deaths as f64 / total_rounds as f64 * 100.0;

        insights.data_points.push(DataPoint {
            metric: "Opening Duel Performance".to_string(),
            value: format!(
                "{first_deaths}/{total_rounds} rounds first death ({first_death_rate:.0}%)"
            ),
            context: format!(
                "{player_name} dies first in {first_death_rate:.0}% of rounds"
            ),
        });

        if first_death_rate > 20.0 {
            insights.insights.push(MatchFinding {
                severity: Impact::High,
                finding: format!(
                    "High first death rate ({first_death_rate:.0}%) indicates risky opening positioning"
                ),
                explanation:
                    "Dying first puts immediate pressure on team and often leads to round loss"
                        .to_string(),
            });
            insights.strategic_recommendations.push(StrategicRecommendation {
                priority: Impact::High,
                recommendation: "Review opening pathing and strategy".to_string(),
                action:
                    "Avoid predictable angles. Use utility before peeking. Request teammate support for opening duels."
                        .to_string(),
            });
        }
    }

    Some(insights)
}

/// Analyze one player's LoL series export.
/// `None` when the player does not appear in the match data.
pub fn lol_player_insights(
    player_name: &str,
    timeline: &LolTimeline,
) -> Option<PersonalizedInsights> {
    let mut found: Option<(Role, u32)> = None;
    for game in &timeline.games {
        for side in [&game.blue_team, &game.red_team] {
            for player in &side.players {
                if player.name.eq_ignore_ascii_case(player_name) {
                    found = Some((player.role, player.stats.total_damage_dealt_to_champions));
                }
            }
        }
    }
    let (role, damage) = found?;

    let mut insights = PersonalizedInsights::new(player_name, Game::Lol);

    // Jungler pathing: early gank success split by map side
    if role == Role::Jungle {
        let player_ganks: Vec<_> = timeline
            .events
            .ganks
            .iter()
            .filter(|g| g.jungler.eq_ignore_ascii_case(player_name))
            .collect();

        let topside: Vec<_> = player_ganks
            .iter()
            .filter(|g| g.lane == "top" && g.timestamp < 360)
            .collect();
        let botside: Vec<_> = player_ganks
            .iter()
            .filter(|g| (g.lane == "bot" || g.lane == "dragon") && g.timestamp < 360)
            .collect();

        let top_success = topside.iter().filter(|g| g.success).count();
        let bot_success = botside.iter().filter(|g| g.success).count();

        let top_rate = if topside.is_empty() {
            0.0
        } else {
            top_success as f64 / topside.len() as f64 * 100.0
        };
        let bot_rate = if botside.is_empty() {
            0.0
        } else {
            bot_success as f64 / botside.len() as f64 * 100.0
        };

        insights.data_points.push(DataPoint {
            metric: "Early Gank Success Rate".to_string(),
            value: format!(
                "Top: {top_rate:.0}% ({top_success}/{}) | Bot: {bot_rate:.0}% ({bot_success}/{})",
                topside.len(),
                botside.len()
            ),
            context: "Pre-6 minute gank success varies significantly by lane".to_string(),
        });

        if top_rate < 30.0 && bot_rate > 60.0 {
            insights.insights.push(MatchFinding {
                severity: Impact::High,
                finding: format!(
                    "Topside ganks have {top_rate:.0}% success vs {bot_rate:.0}% botside"
                ),
                explanation:
                    "Low topside success suggests counter-jungling risk or poor gank timing/execution"
                        .to_string(),
            });
            insights.strategic_recommendations.push(StrategicRecommendation {
                priority: Impact::High,
                recommendation: "Prioritize botside pathing to secure early drake control"
                    .to_string(),
                action:
                    "Play to the higher-success-rate lane. Topside pathing is frequently counter-jungled or results in low-impact ganks."
                        .to_string(),
            });
        }
    }

    // Carry damage output per minute
    if role.is_carry() {
        let duration = timeline
            .games
            .first()
            .map(|g| g.duration)
            .filter(|d| *d > 0)
            .unwrap_or(1800);
        let dpm = damage as f64 / duration as f64 * 60.0;

        insights.data_points.push(DataPoint {
            metric: "Damage Per Minute".to_string(),
            value: format!("{dpm:.0} DPM"),
            context: format!(
                "Total damage: {} over {} minutes",
                format_thousands(damage as u64),
                duration / 60
            ),
        });

        if dpm < 450.0 {
            insights.insights.push(MatchFinding {
                severity: Impact::Medium,
                finding: format!("Low damage output ({dpm:.0} DPM) for {role} role"),
                explanation:
                    "Insufficient damage means team struggles in fights and objective contests"
                        .to_string(),
            });
            insights.strategic_recommendations.push(StrategicRecommendation {
                priority: Impact::Medium,
                recommendation: "Improve positioning to maximize damage uptime in team fights"
                    .to_string(),
                action:
                    "Review fight positioning. Focus on staying alive while dealing consistent damage."
                        .to_string(),
            });
        }
    }

    Some(insights)
}
