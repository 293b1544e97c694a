//! Structured coaching findings.

use serde::{Deserialize, Serialize};

/// Severity of a rule-based insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Positive,
    Info,
    Warning,
    Concern,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Positive => "positive",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Concern => "concern",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Impact scale for recurring mistakes and correlation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Medium,
    High,
    Critical,
}

/// Direction of a metric over a recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
            Trend::Stable => "stable",
            Trend::InsufficientData => "insufficient_data",
        };
        write!(f, "{}", s)
    }
}

/// A single rule-based finding. Produced per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub severity: Severity,
    pub category: String,
    pub message: String,
    pub recommendation: String,
}

impl Insight {
    pub fn new(
        severity: Severity,
        category: impl Into<String>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// A pattern persisting over a window of matches, distinct from a
/// single-window trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringMistake {
    pub pattern: String,
    /// "k/n games", or "recent trend" for the long-horizon decline pattern.
    pub frequency: String,
    pub severity: Impact,
    pub description: String,
    pub impact: String,
    pub recommendation: String,
}

/// A micro-to-macro correlation finding linking one role's play pattern to
/// a team-level outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationFinding {
    pub player_role: String,
    pub issue: String,
    pub micro_pattern: String,
    pub macro_impact: String,
    pub recommendation: String,
    pub severity: Impact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization() {
        assert_eq!(
            serde_json::to_string(&Severity::Concern).unwrap(),
            "\"concern\""
        );
        let parsed: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(parsed, Severity::Critical);
    }

    #[test]
    fn test_impact_serialization() {
        assert_eq!(serde_json::to_string(&Impact::High).unwrap(), "\"high\"");
    }

    #[test]
    fn test_trend_serialization() {
        assert_eq!(
            serde_json::to_string(&Trend::InsufficientData).unwrap(),
            "\"insufficient_data\""
        );
        assert_eq!(format!("{}", Trend::Improving), "improving");
    }

    #[test]
    fn test_insight_constructor() {
        let insight = Insight::new(
            Severity::Warning,
            "Early Game",
            "Low first blood rate",
            "Work on lane trading",
        );
        assert_eq!(insight.severity, Severity::Warning);
        assert_eq!(insight.category, "Early Game");
    }
}
