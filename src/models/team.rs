//! Per-team series records.

use serde::{Deserialize, Serialize};

use super::Game;
use crate::calculate;

/// One team's aggregate outcome for a series.
///
/// Objective counters are per-game averages across the series; the win flag
/// is set when the team took more than half the games.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMatchStat {
    pub match_id: String,
    pub game: Game,
    pub team_name: String,
    pub win: bool,
    pub dragons_secured: f64,
    pub barons_secured: f64,
    pub towers_destroyed: f64,
    pub first_blood: bool,
    /// Average game duration in minutes.
    pub avg_game_duration: f64,
    pub win_rate: f64,
}

impl TeamMatchStat {
    /// Aggregate summed series counters into per-game averages.
    ///
    /// `games` is the number of games in the series; callers short-circuit
    /// empty series before reaching this point.
    #[allow(clippy::too_many_arguments)]
    pub fn from_series(
        match_id: String,
        game: Game,
        team_name: String,
        games: u32,
        wins: u32,
        dragons: u32,
        barons: u32,
        towers: u32,
        first_bloods: u32,
        total_duration_secs: u32,
    ) -> Self {
        let n = games.max(1) as f64;
        let win_rate = wins as f64 / n;

        Self {
            match_id,
            game,
            team_name,
            win: win_rate > 0.5,
            dragons_secured: calculate::round2(dragons as f64 / n),
            barons_secured: calculate::round2(barons as f64 / n),
            towers_destroyed: calculate::round2(towers as f64 / n),
            first_blood: first_bloods > 0,
            avg_game_duration: calculate::round1(total_duration_secs as f64 / 60.0 / n),
            win_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_sweep() {
        let stat = TeamMatchStat::from_series(
            "series-9".to_string(),
            Game::Lol,
            "Cloud9".to_string(),
            2, // games
            2, // wins
            6, // dragons
            2, // barons
            18,
            2,
            2 * 1800,
        );

        assert!(stat.win);
        assert_eq!(stat.win_rate, 1.0);
        assert_eq!(stat.dragons_secured, 3.0);
        assert_eq!(stat.barons_secured, 1.0);
        assert_eq!(stat.towers_destroyed, 9.0);
        assert!(stat.first_blood);
        assert_eq!(stat.avg_game_duration, 30.0);
    }

    #[test]
    fn test_split_series_is_not_a_win() {
        let stat = TeamMatchStat::from_series(
            "series-10".to_string(),
            Game::Lol,
            "Cloud9".to_string(),
            2,
            1,
            3,
            0,
            8,
            0,
            2 * 2100,
        );

        assert!(!stat.win);
        assert_eq!(stat.win_rate, 0.5);
        assert!(!stat.first_blood);
    }
}
