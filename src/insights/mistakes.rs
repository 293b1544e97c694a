//! Recurring-mistake detection.
//!
//! Scans a player's rolling window for patterns that persist across games,
//! as opposed to the single-window trend rules. Patterns may co-fire; no
//! dedup or priority ordering is applied.

use crate::calculate::mean;
use crate::models::{Impact, MatchPlayerStat, RecurringMistake, Role};

/// Patterns evaluate the last `MISTAKE_WINDOW` games.
const MISTAKE_WINDOW: usize = 10;

/// Fewer samples than this yields an empty result, not an error.
const MIN_SAMPLES: usize = 3;

/// The long-horizon decline pattern needs this much total history.
const DECLINE_MIN_HISTORY: usize = 10;

/// Read-only context shared by the pattern checks.
struct PatternContext<'a> {
    /// Last min(n, 10) records, oldest first.
    window: &'a [MatchPlayerStat],
    /// Full cached history, oldest first.
    history: &'a [MatchPlayerStat],
    /// Most recent record's role.
    role: Role,
}

type PatternFn = fn(&PatternContext) -> Option<RecurringMistake>;

const PATTERNS: &[PatternFn] = &[
    high_death_count,
    poor_cs_management,
    insufficient_vision,
    low_damage_output,
    performance_decline,
];

/// Detect persistent mistake patterns over a player's history.
///
/// Returns an empty list for fewer than 3 samples, regardless of content.
pub fn detect_recurring_mistakes(history: &[MatchPlayerStat]) -> Vec<RecurringMistake> {
    if history.len() < MIN_SAMPLES {
        return Vec::new();
    }

    let window = &history[history.len().saturating_sub(MISTAKE_WINDOW)..];
    let ctx = PatternContext {
        window,
        history,
        role: history.last().map(|s| s.role).unwrap_or_default(),
    };

    PATTERNS.iter().filter_map(|pattern| pattern(&ctx)).collect()
}

/// Inclusive frequency check: fires when `hits >= n * threshold`.
fn meets_threshold(hits: usize, n: usize, threshold: f64) -> bool {
    hits as f64 >= n as f64 * threshold
}

fn high_death_count(ctx: &PatternContext) -> Option<RecurringMistake> {
    let n = ctx.window.len();
    let hits = ctx.window.iter().filter(|s| s.deaths >= 5).count();
    if !meets_threshold(hits, n, 0.6) {
        return None;
    }
    Some(RecurringMistake {
        pattern: "High Death Count".to_string(),
        frequency: format!("{hits}/{n} games"),
        severity: Impact::Critical,
        description: "Player consistently dies 5+ times per game".to_string(),
        impact: "High death count leads to gold deficit, lost map pressure, and missed objectives"
            .to_string(),
        recommendation:
            "Review positioning in team fights. Avoid face-checking bushes. Ward deeper before objectives."
                .to_string(),
    })
}

fn poor_cs_management(ctx: &PatternContext) -> Option<RecurringMistake> {
    if !ctx.role.is_cs_dependent() {
        return None;
    }
    let n = ctx.window.len();
    let hits = ctx.window.iter().filter(|s| s.cs_per_min < 6.5).count();
    if !meets_threshold(hits, n, 0.5) {
        return None;
    }
    Some(RecurringMistake {
        pattern: "Poor CS Management".to_string(),
        frequency: format!("{hits}/{n} games"),
        severity: Impact::High,
        description: format!("{} player consistently below 6.5 CS/min", ctx.role),
        impact: "Low CS leads to gold deficit, delayed item spikes, reduced team fight impact"
            .to_string(),
        recommendation:
            "Practice last-hitting in practice tool. Focus on wave management. Don't roam at cost of waves."
                .to_string(),
    })
}

fn insufficient_vision(ctx: &PatternContext) -> Option<RecurringMistake> {
    if !ctx.role.is_vision_role() {
        return None;
    }
    let n = ctx.window.len();
    let hits = ctx.window.iter().filter(|s| s.vision_score < 40).count();
    if !meets_threshold(hits, n, 0.6) {
        return None;
    }
    Some(RecurringMistake {
        pattern: "Insufficient Vision Control".to_string(),
        frequency: format!("{hits}/{n} games"),
        severity: Impact::High,
        description: format!("{} consistently below 40 vision score", ctx.role),
        impact: "Poor vision control leads to ganks, lost objectives, and unsafe rotations"
            .to_string(),
        recommendation:
            "Ward before every objective. Sweep enemy vision. Buy more control wards (aim for 2+ per back)."
                .to_string(),
    })
}

fn low_damage_output(ctx: &PatternContext) -> Option<RecurringMistake> {
    if !ctx.role.is_carry() {
        return None;
    }
    let n = ctx.window.len();
    let hits = ctx.window.iter().filter(|s| s.damage_dealt < 12000).count();
    if !meets_threshold(hits, n, 0.5) {
        return None;
    }
    Some(RecurringMistake {
        pattern: "Low Damage Output".to_string(),
        frequency: format!("{hits}/{n} games"),
        severity: Impact::Medium,
        description: "Carry role with consistently low damage to champions".to_string(),
        impact: "Low damage means team can't secure kills or win team fights effectively"
            .to_string(),
        recommendation:
            "Position more aggressively in fights. Focus on damage uptime. Review target selection."
                .to_string(),
    })
}

fn performance_decline(ctx: &PatternContext) -> Option<RecurringMistake> {
    if ctx.history.len() < DECLINE_MIN_HISTORY {
        return None;
    }

    let first: Vec<f64> = ctx.history[..5].iter().map(|s| s.kda).collect();
    let recent: Vec<f64> = ctx.history[ctx.history.len() - 5..]
        .iter()
        .map(|s| s.kda)
        .collect();

    let first_avg = mean(&first)?;
    let recent_avg = mean(&recent)?;

    if recent_avg >= first_avg * 0.7 {
        return None;
    }
    Some(RecurringMistake {
        pattern: "Performance Decline".to_string(),
        frequency: "Recent trend".to_string(),
        severity: Impact::Critical,
        description: format!("KDA dropped from {first_avg:.2} to {recent_avg:.2}"),
        impact:
            "Declining performance suggests burnout, meta adjustment issues, or mechanical decline"
                .to_string(),
        recommendation: "Take a break. Review recent patch changes. Watch VODs to identify new bad habits."
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Game;

    #[allow(clippy::too_many_arguments)]
    fn stat(
        n: u32,
        role: Role,
        kills: u32,
        deaths: u32,
        assists: u32,
        minions: u32,
        vision: u32,
        damage: u32,
    ) -> MatchPlayerStat {
        MatchPlayerStat::new(
            "Fudge".to_string(),
            format!("m-{n}"),
            n,
            Game::Lol,
            role,
            "Gnar".to_string(),
            kills,
            deaths,
            assists,
            minions,
            vision,
            damage,
            10000,
            1800,
        )
    }

    fn feeder(n: u32, deaths: u32) -> MatchPlayerStat {
        stat(n, Role::Top, 2, deaths, 3, 200, 25, 15000)
    }

    #[test]
    fn test_fewer_than_three_samples_is_empty() {
        assert!(detect_recurring_mistakes(&[]).is_empty());
        assert!(detect_recurring_mistakes(&[feeder(1, 9)]).is_empty());
        assert!(detect_recurring_mistakes(&[feeder(1, 9), feeder(2, 9)]).is_empty());
    }

    #[test]
    fn test_high_death_pattern_fires_at_inclusive_boundary() {
        // Exactly 6/10 games with 5+ deaths: inclusive threshold fires
        let mut history: Vec<MatchPlayerStat> = (0..6).map(|n| feeder(n, 6)).collect();
        history.extend((6..10).map(|n| feeder(n, 1)));

        let mistakes = detect_recurring_mistakes(&history);
        assert!(mistakes.iter().any(|m| m.pattern == "High Death Count"));

        let mistake = mistakes
            .iter()
            .find(|m| m.pattern == "High Death Count")
            .unwrap();
        assert_eq!(mistake.frequency, "6/10 games");
        assert_eq!(mistake.severity, Impact::Critical);
    }

    #[test]
    fn test_high_death_pattern_below_boundary_is_silent() {
        // 5/10 games is below the 60% threshold
        let mut history: Vec<MatchPlayerStat> = (0..5).map(|n| feeder(n, 6)).collect();
        history.extend((5..10).map(|n| feeder(n, 1)));

        let mistakes = detect_recurring_mistakes(&history);
        assert!(!mistakes.iter().any(|m| m.pattern == "High Death Count"));
    }

    #[test]
    fn test_poor_cs_gated_to_cs_roles() {
        // 100 minions over 30 min = 3.33 cs/min, every game
        let top: Vec<MatchPlayerStat> = (0..6)
            .map(|n| stat(n, Role::Top, 3, 2, 3, 100, 25, 15000))
            .collect();
        let mistakes = detect_recurring_mistakes(&top);
        assert!(mistakes.iter().any(|m| m.pattern == "Poor CS Management"));

        let support: Vec<MatchPlayerStat> = (0..6)
            .map(|n| stat(n, Role::Support, 3, 2, 3, 100, 80, 15000))
            .collect();
        let mistakes = detect_recurring_mistakes(&support);
        assert!(!mistakes.iter().any(|m| m.pattern == "Poor CS Management"));
    }

    #[test]
    fn test_vision_pattern_gated_to_vision_roles() {
        let jungle: Vec<MatchPlayerStat> = (0..5)
            .map(|n| stat(n, Role::Jungle, 3, 2, 6, 150, 20, 14000))
            .collect();
        let mistakes = detect_recurring_mistakes(&jungle);
        assert!(mistakes
            .iter()
            .any(|m| m.pattern == "Insufficient Vision Control"));

        let mid: Vec<MatchPlayerStat> = (0..5)
            .map(|n| stat(n, Role::Mid, 3, 2, 6, 300, 20, 14000))
            .collect();
        let mistakes = detect_recurring_mistakes(&mid);
        assert!(!mistakes
            .iter()
            .any(|m| m.pattern == "Insufficient Vision Control"));
    }

    #[test]
    fn test_low_damage_gated_to_carries() {
        let adc: Vec<MatchPlayerStat> = (0..6)
            .map(|n| stat(n, Role::Adc, 3, 2, 4, 250, 25, 9000))
            .collect();
        let mistakes = detect_recurring_mistakes(&adc);
        assert!(mistakes.iter().any(|m| m.pattern == "Low Damage Output"));

        let top: Vec<MatchPlayerStat> = (0..6)
            .map(|n| stat(n, Role::Top, 3, 2, 4, 250, 25, 9000))
            .collect();
        let mistakes = detect_recurring_mistakes(&top);
        assert!(!mistakes.iter().any(|m| m.pattern == "Low Damage Output"));
    }

    #[test]
    fn test_performance_decline_needs_ten_samples() {
        // 9 samples with a clear decline: pattern stays silent
        let mut history: Vec<MatchPlayerStat> = (0..5)
            .map(|n| stat(n, Role::Mid, 10, 1, 10, 250, 30, 20000))
            .collect();
        history.extend((5..9).map(|n| stat(n, Role::Mid, 1, 8, 1, 250, 30, 20000)));

        let mistakes = detect_recurring_mistakes(&history);
        assert!(!mistakes.iter().any(|m| m.pattern == "Performance Decline"));
    }

    #[test]
    fn test_performance_decline_compares_first_and_last_five() {
        // First 5: KDA 20.0; last 5: KDA 0.25 -> well below 70%
        let mut history: Vec<MatchPlayerStat> = (0..5)
            .map(|n| stat(n, Role::Mid, 10, 1, 10, 250, 30, 20000))
            .collect();
        history.extend((5..10).map(|n| stat(n, Role::Mid, 1, 8, 1, 250, 30, 20000)));

        let mistakes = detect_recurring_mistakes(&history);
        let decline = mistakes
            .iter()
            .find(|m| m.pattern == "Performance Decline")
            .unwrap();
        assert_eq!(decline.frequency, "Recent trend");
        assert_eq!(decline.severity, Impact::Critical);
    }

    #[test]
    fn test_patterns_co_fire_without_dedup() {
        // An ADC who feeds, misses CS, and deals no damage: three patterns
        let history: Vec<MatchPlayerStat> = (0..10)
            .map(|n| stat(n, Role::Adc, 1, 7, 2, 90, 15, 8000))
            .collect();

        let mistakes = detect_recurring_mistakes(&history);
        let patterns: Vec<&str> = mistakes.iter().map(|m| m.pattern.as_str()).collect();
        assert!(patterns.contains(&"High Death Count"));
        assert!(patterns.contains(&"Poor CS Management"));
        assert!(patterns.contains(&"Low Damage Output"));
    }
}
