//! Post-match review agenda generation.
//!
//! Scans a concluded match's timeline for critical decision points and
//! errors worth discussing, producing an ordered agenda.

use std::collections::BTreeMap;

use crate::calculate::mean;
use crate::format_timestamp;
use crate::models::{
    AgendaItem, AgendaStatus, Game, LolTimeline, ReviewAgenda, ValorantTimeline,
};

/// Build a VALORANT review agenda from a round-by-round timeline.
pub fn valorant_review(timeline: &ValorantTimeline) -> ReviewAgenda {
    let mut agenda = ReviewAgenda::new(
        non_empty(&timeline.match_id, "unknown"),
        Game::Valorant,
    );
    agenda.match_type = Some(non_empty(&timeline.match_type, "BO1"));
    agenda.opponent = Some(non_empty(&timeline.opponent, "Unknown"));
    agenda.map = Some(non_empty(&timeline.map, "Unknown"));
    agenda.final_score = Some(non_empty(&timeline.final_score, "0-0"));

    let rounds = &timeline.rounds;

    // Pistol rounds (1 and 13)
    let pistols: Vec<_> = rounds
        .iter()
        .filter(|r| r.round_num == 1 || r.round_num == 13)
        .collect();
    let pistol_wins = pistols.iter().filter(|r| r.team_won).count();
    let status = match pistol_wins {
        2 => AgendaStatus::WonBoth,
        0 => AgendaStatus::LostBoth,
        _ => AgendaStatus::Split,
    };
    let notes = if pistol_wins < 2 {
        "Review pistol round setups and compositions"
    } else {
        "Strong pistol performance"
    };
    agenda.agenda_items.push(
        AgendaItem::new(
            "Pistol Rounds",
            format!("Won {pistol_wins}/2 pistol rounds"),
            notes,
        )
        .with_status(status),
    );

    // Round-2 force buy that handed over the bonus round
    let force_buys: Vec<_> = rounds
        .iter()
        .filter(|r| r.buy_type.as_deref() == Some("force") && r.round_num == 2)
        .collect();
    if !force_buys.is_empty() && force_buys.iter().all(|r| !r.team_won) {
        agenda.agenda_items.push(
            AgendaItem::new(
                "Eco Management",
                "Unsuccessful force-buy on Round 2 led to bonus round loss (Round 3)",
                "Review force-buy vs. save criteria. Consider full save after lost pistol.",
            )
            .with_status(AgendaStatus::Concern),
        );
    }

    // Late executes that turned into losses
    let late_losses = rounds
        .iter()
        .filter(|r| r.time_remaining < 20 && !r.team_won)
        .count();
    if late_losses >= 4 {
        agenda.agenda_items.push(
            AgendaItem::new(
                "Mid-Round Calls",
                format!(
                    "{late_losses}/{} rounds saw late execute (<20s) resulting in losses",
                    rounds.len()
                ),
                "Improve decision-making speed. Earlier site commitment or gather intel sooner.",
            )
            .with_status(AgendaStatus::Critical),
        );
    }

    // Ultimate orb economy
    let orbs = timeline.team_orbs_collected;
    let enemy_orbs = timeline.enemy_orbs_collected;
    if (orbs as f64) < enemy_orbs as f64 * 0.7 {
        agenda.agenda_items.push(
            AgendaItem::new(
                "Ultimate Economy",
                format!("Only {orbs} orbs collected vs {enemy_orbs} by enemy"),
                "Prioritize orb collection. Rotate for orbs during slow rounds. Ultimate advantage is crucial.",
            )
            .with_status(AgendaStatus::Concern),
        );
    }

    // Per-site success rates (BTreeMap keeps the item order stable)
    let mut site_attacks: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for round in rounds {
        let site = round
            .target_site
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        let entry = site_attacks.entry(site).or_default();
        entry.0 += 1;
        if round.team_won {
            entry.1 += 1;
        }
    }
    for (site, (attempts, wins)) in &site_attacks {
        let success_rate = *wins as f64 / *attempts as f64 * 100.0;
        if success_rate < 30.0 && *attempts >= 3 {
            agenda.agenda_items.push(
                AgendaItem::new(
                    format!("Site Control - {site}"),
                    format!(
                        "Low success rate on {site} site ({success_rate:.0}% - {wins}/{attempts})"
                    ),
                    format!(
                        "Review {site} site execution. Consider alternative strategies or improved utility usage."
                    ),
                )
                .with_status(AgendaStatus::Concern),
            );
        }
    }

    agenda
}

/// Build a LoL review agenda from the first game of a series export.
/// `None` when the export carries no games.
pub fn lol_review(timeline: &LolTimeline) -> Option<ReviewAgenda> {
    let game = timeline.games.first()?;

    let mut agenda = ReviewAgenda::new(non_empty(&timeline.series_id, "unknown"), Game::Lol);
    agenda.tournament = Some(non_empty(&timeline.tournament, "Unknown"));
    agenda.teams = timeline.teams.clone();

    let events = &timeline.events;

    // First drake setup
    if let Some(first_drake) = &events.first_drake {
        if !first_drake.secured {
            agenda.agenda_items.push(
                AgendaItem::new(
                    "First Drake Setup",
                    "Inadequate deep vision, teleport wards not swept",
                    "Lost vision control allowed enemy to secure drake. Ward deeper at 4:00.",
                )
                .with_timestamp("~5:00"),
            );
        }
    }

    // Baron fights thrown with full pockets
    for fight in &events.baron_fights {
        if fight.result == "lost" && fight.unspent_gold > 3000 {
            agenda.agenda_items.push(
                AgendaItem::new(
                    "Baron Setup",
                    format!(
                        "Excessive unspent gold in inventories ({}g total)",
                        fight.unspent_gold
                    ),
                    "Suggest a base timer 45s prior to baron spawn, especially after mid T2 tower.",
                )
                .with_timestamp(format_timestamp(fight.timestamp)),
            );
        }
    }

    // Isolated deaths before objectives
    for death in &events.isolated_deaths {
        agenda.agenda_items.push(
            AgendaItem::new(
                "Isolated Deaths",
                format!(
                    "{} in {} before {}",
                    death.player,
                    death.location,
                    death.objective.as_deref().unwrap_or("objective")
                ),
                "Avoid isolated positioning before objectives. Vision deficit and no teammate support.",
            )
            .with_timestamp(format_timestamp(death.timestamp)),
        );
    }

    // Failed teleports
    for tp in &events.teleport_uses {
        if !tp.successful {
            agenda.agenda_items.push(
                AgendaItem::new(
                    "Teleport Use",
                    format!(
                        "Poor TP {} led to lost teamfight",
                        tp.kind.as_deref().unwrap_or("flank")
                    ),
                    "Review TP positioning. Ensure vision before TP. Coordinate with team.",
                )
                .with_timestamp(format_timestamp(tp.timestamp)),
            );
        }
    }

    // Game-wide vision check over the blue side
    let vision_scores: Vec<f64> = game
        .blue_team
        .players
        .iter()
        .map(|p| p.stats.vision_score as f64)
        .collect();
    if let Some(avg_vision) = mean(&vision_scores) {
        if avg_vision < 30.0 {
            agenda.agenda_items.push(
                AgendaItem::new(
                    "Vision Control",
                    format!("Low team vision score (avg {avg_vision:.1} per player)"),
                    "Increase ward placement frequency. Support and Jungle need 50+ vision score.",
                )
                .with_timestamp("Game-wide"),
            );
        }
    }

    Some(agenda)
}

fn non_empty(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BaronFight, FirstDrake, IsolatedDeath, LolEvents, LolTimelineGame, LolTimelinePlayer,
        PlayerCounters, TeleportUse, ValorantRound,
    };

    fn round(num: u32, won: bool) -> ValorantRound {
        ValorantRound {
            round_num: num,
            team_won: won,
            time_remaining: 30,
            ..Default::default()
        }
    }

    #[test]
    fn test_pistol_split_status() {
        let timeline = ValorantTimeline {
            match_id: "v-1".to_string(),
            rounds: vec![round(1, true), round(13, false)],
            ..Default::default()
        };

        let agenda = valorant_review(&timeline);
        let pistols = &agenda.agenda_items[0];
        assert_eq!(pistols.category, "Pistol Rounds");
        assert_eq!(pistols.status, Some(AgendaStatus::Split));
        assert_eq!(pistols.detail, "Won 1/2 pistol rounds");
    }

    #[test]
    fn test_late_execute_item_needs_four_losses() {
        let mut rounds: Vec<ValorantRound> = (1..=5)
            .map(|n| ValorantRound {
                round_num: n,
                team_won: false,
                time_remaining: 12,
                ..Default::default()
            })
            .collect();
        rounds.push(round(6, true));

        let timeline = ValorantTimeline {
            rounds,
            ..Default::default()
        };
        let agenda = valorant_review(&timeline);
        assert!(agenda
            .agenda_items
            .iter()
            .any(|i| i.category == "Mid-Round Calls" && i.status == Some(AgendaStatus::Critical)));
    }

    #[test]
    fn test_orb_economy_item() {
        let timeline = ValorantTimeline {
            team_orbs_collected: 3,
            enemy_orbs_collected: 8,
            ..Default::default()
        };

        let agenda = valorant_review(&timeline);
        assert!(agenda
            .agenda_items
            .iter()
            .any(|i| i.category == "Ultimate Economy"));
    }

    #[test]
    fn test_site_rate_needs_three_attempts() {
        // Two failed A hits: not enough attempts to flag
        let rounds = vec![
            ValorantRound {
                round_num: 3,
                target_site: Some("A".to_string()),
                ..Default::default()
            },
            ValorantRound {
                round_num: 4,
                target_site: Some("A".to_string()),
                ..Default::default()
            },
        ];
        let timeline = ValorantTimeline {
            rounds,
            ..Default::default()
        };
        let agenda = valorant_review(&timeline);
        assert!(!agenda
            .agenda_items
            .iter()
            .any(|i| i.category.starts_with("Site Control")));
    }

    fn lol_timeline() -> LolTimeline {
        LolTimeline {
            series_id: "s-7".to_string(),
            tournament: "LCS".to_string(),
            teams: vec!["Cloud9".to_string(), "Team Liquid".to_string()],
            games: vec![LolTimelineGame {
                duration: 2100,
                ..Default::default()
            }],
            events: LolEvents {
                first_drake: Some(FirstDrake { secured: false }),
                baron_fights: vec![BaronFight {
                    result: "lost".to_string(),
                    unspent_gold: 4200,
                    timestamp: 1500,
                }],
                isolated_deaths: vec![IsolatedDeath {
                    player: "Fudge".to_string(),
                    location: "enemy jungle".to_string(),
                    objective: Some("baron".to_string()),
                    timestamp: 1450,
                }],
                teleport_uses: vec![TeleportUse {
                    successful: false,
                    kind: Some("flank".to_string()),
                    timestamp: 1600,
                }],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_lol_agenda_items_in_order() {
        let agenda = lol_review(&lol_timeline()).unwrap();

        let categories: Vec<&str> = agenda
            .agenda_items
            .iter()
            .map(|i| i.category.as_str())
            .collect();
        assert_eq!(
            categories,
            vec![
                "First Drake Setup",
                "Baron Setup",
                "Isolated Deaths",
                "Teleport Use"
            ]
        );
    }

    #[test]
    fn test_lol_timestamps_formatted() {
        let agenda = lol_review(&lol_timeline()).unwrap();
        let baron = agenda
            .agenda_items
            .iter()
            .find(|i| i.category == "Baron Setup")
            .unwrap();
        assert_eq!(baron.timestamp.as_deref(), Some("25:00"));
    }

    #[test]
    fn test_lol_review_without_games_is_none() {
        let timeline = LolTimeline::default();
        assert!(lol_review(&timeline).is_none());
    }

    #[test]
    fn test_low_team_vision_item() {
        let mut timeline = lol_timeline();
        timeline.games[0].blue_team.players = (0..5)
            .map(|_| LolTimelinePlayer {
                name: "p".to_string(),
                stats: PlayerCounters {
                    vision_score: 20,
                    ..Default::default()
                },
                ..Default::default()
            })
            .collect();

        let agenda = lol_review(&timeline).unwrap();
        let vision = agenda
            .agenda_items
            .iter()
            .find(|i| i.category == "Vision Control")
            .unwrap();
        assert_eq!(vision.timestamp.as_deref(), Some("Game-wide"));
    }
}
