//! Metric derivation math.
//!
//! Pure functions computing the per-player combat and farm metrics:
//! - KDA and CS-per-minute
//! - Weighted 0-100 performance score
//! - Trend classification over a recent window
//!
//! Every averaging site is guarded against empty input; callers get an
//! explicit `None` (or the insufficient-data trend) instead of NaN.

use crate::models::Trend;

/// Combat-efficiency ratio: (kills + assists) / deaths, rounded to 2
/// decimals. A deathless game scores kills + assists.
pub fn kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    if deaths == 0 {
        return (kills + assists) as f64;
    }
    round2((kills + assists) as f64 / deaths as f64)
}

/// Minion kills per minute. Zero-duration games score 0.
pub fn cs_per_min(minions_killed: u32, duration_secs: u32) -> f64 {
    if duration_secs == 0 {
        return 0.0;
    }
    minions_killed as f64 / (duration_secs as f64 / 60.0)
}

/// Weighted 0-100 performance composite.
///
/// Each term is capped before summation: KDA at 40 (scale factor 10, flat
/// 40 when deathless), damage at 30 (damage/500), CS rate at 20
/// (CS/min x 2), vision at 10 (vision/3). Total clamped to [0, 100] and
/// rounded to 1 decimal.
pub fn performance_score(
    kills: u32,
    deaths: u32,
    assists: u32,
    damage_dealt: u32,
    minions_killed: u32,
    vision_score: u32,
    duration_secs: u32,
) -> f64 {
    let kda_term = if deaths > 0 {
        ((kills + assists) as f64 / deaths as f64 * 10.0).min(40.0)
    } else {
        40.0
    };
    let damage_term = (damage_dealt as f64 / 500.0).min(30.0);
    let cs_term = (cs_per_min(minions_killed, duration_secs) * 2.0).min(20.0);
    let vision_term = (vision_score as f64 / 3.0).min(10.0);

    round1((kda_term + damage_term + cs_term + vision_term).clamp(0.0, 100.0))
}

/// Classify the direction of an ordered numeric sequence.
///
/// Splits the sequence at the midpoint (the longer half goes second when
/// the split is uneven) and compares half averages: > +10% improving,
/// < -10% declining, otherwise stable. Fewer than 3 samples is
/// insufficient data.
pub fn trend(values: &[f64]) -> Trend {
    if values.len() < 3 {
        return Trend::InsufficientData;
    }

    let mid = values.len() / 2;
    // Halves are non-empty for len >= 3, so the means always exist.
    let avg_first = mean(&values[..mid]).unwrap_or(0.0);
    let avg_second = mean(&values[mid..]).unwrap_or(0.0);

    let diff_percent = if avg_first > 0.0 {
        (avg_second - avg_first) / avg_first * 100.0
    } else {
        0.0
    };

    if diff_percent > 10.0 {
        Trend::Improving
    } else if diff_percent < -10.0 {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Arithmetic mean, `None` on empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Fraction of entries matching a predicate, `None` on empty input.
pub fn ratio<T>(values: &[T], predicate: impl Fn(&T) -> bool) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let hits = values.iter().filter(|v| predicate(v)).count();
    Some(hits as f64 / values.len() as f64)
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kda_standard() {
        assert_eq!(kda(3, 2, 5), 4.0);
        assert_eq!(kda(7, 3, 4), 3.67);
    }

    #[test]
    fn test_kda_deathless() {
        assert_eq!(kda(3, 0, 2), 5.0);
        assert_eq!(kda(0, 0, 0), 0.0);
    }

    #[test]
    fn test_cs_per_min() {
        assert!((cs_per_min(180, 1800) - 6.0).abs() < 1e-9);
        assert!((cs_per_min(260, 2400) - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_cs_per_min_zero_duration() {
        assert_eq!(cs_per_min(100, 0), 0.0);
    }

    #[test]
    fn test_performance_score_caps() {
        // Every term maxed out
        let score = performance_score(30, 1, 30, 50000, 600, 120, 1800);
        assert_eq!(score, 100.0);

        // Deathless game takes the flat KDA term
        let score = performance_score(0, 0, 0, 0, 0, 0, 1800);
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_performance_score_zero_duration_still_bounded() {
        let score = performance_score(10, 2, 5, 20000, 250, 60, 0);
        assert!(score >= 0.0 && score <= 100.0);
    }

    #[test]
    fn test_performance_score_typical_game() {
        // KDA 4.0 -> 40 capped at 40? (3+5)/2*10 = 40; damage 15000/500 = 30;
        // cs 6.0*2 = 12; vision 45/3 = 15 capped at 10 => 40+30+12+10 = 92
        let score = performance_score(3, 2, 5, 15000, 180, 45, 1800);
        assert_eq!(score, 92.0);
    }

    #[test]
    fn test_trend_insufficient_data() {
        assert_eq!(trend(&[]), Trend::InsufficientData);
        assert_eq!(trend(&[1.0]), Trend::InsufficientData);
        assert_eq!(trend(&[1.0, 2.0]), Trend::InsufficientData);
    }

    #[test]
    fn test_trend_improving() {
        assert_eq!(trend(&[1.0, 1.0, 2.0, 2.0]), Trend::Improving);
    }

    #[test]
    fn test_trend_declining() {
        assert_eq!(trend(&[4.0, 4.0, 2.0, 2.0]), Trend::Declining);
    }

    #[test]
    fn test_trend_stable() {
        assert_eq!(trend(&[2.0, 2.0, 2.0, 2.1]), Trend::Stable);
    }

    #[test]
    fn test_trend_uneven_split_favors_second_half() {
        // len 5 -> first half [..2], second half [2..]
        assert_eq!(trend(&[1.0, 1.0, 2.0, 2.0, 2.0]), Trend::Improving);
    }

    #[test]
    fn test_trend_zero_baseline_is_stable() {
        assert_eq!(trend(&[0.0, 0.0, 5.0, 5.0]), Trend::Stable);
    }

    #[test]
    fn test_mean_guards_empty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }

    #[test]
    fn test_ratio_guards_empty() {
        let empty: [u32; 0] = [];
        assert_eq!(ratio(&empty, |_| true), None);
        assert_eq!(ratio(&[1, 2, 3, 4], |v| *v > 2), Some(0.5));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round1(3.14), 3.1);
        assert_eq!(round2(3.14159), 3.14);
    }
}
