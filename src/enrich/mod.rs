//! Optional AI commentary.
//!
//! The rule engines are the product; the AI layer is strictly additive.
//! [`TextEnricher`] wraps an optional [`backend::AiBackend`] and never
//! fails: an unconfigured enricher yields a sentinel string, a transient
//! backend failure yields an inline diagnostic, and neither ever blocks
//! the rule-based result.

pub mod backend;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use backend::{AiBackend, ChatMessage, ChatRequest};

/// Errors from the AI backends.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("AI backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("AI response unparseable: {0}")]
    ResponseParseError(String),

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

/// Sentinel attached when no backend is configured.
pub const NOT_CONFIGURED: &str = "AI commentary not configured";

/// What kind of commentary is being requested; selects the coach persona
/// and the framing line of the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentaryKind {
    PlayerPerformance,
    TeamMacro,
    ReviewSummary,
    ScenarioAnalysis,
}

impl CommentaryKind {
    fn system_prompt(&self) -> &'static str {
        match self {
            CommentaryKind::PlayerPerformance => {
                "You are a professional esports coach providing data-driven insights."
            }
            CommentaryKind::TeamMacro => {
                "You are a professional esports team strategist analyzing macro play patterns."
            }
            CommentaryKind::ReviewSummary => {
                "You are a professional esports coach reviewing team performance."
            }
            CommentaryKind::ScenarioAnalysis => {
                "You are a professional esports strategist analyzing game decisions."
            }
        }
    }

    fn framing(&self) -> &'static str {
        match self {
            CommentaryKind::PlayerPerformance => {
                "Provide one paragraph of actionable coaching advice (2-3 sentences)."
            }
            CommentaryKind::TeamMacro => {
                "Provide strategic coaching recommendations (one paragraph, 3-4 sentences)."
            }
            CommentaryKind::ReviewSummary => {
                "Provide a 2-3 sentence strategic summary focusing on top priorities."
            }
            CommentaryKind::ScenarioAnalysis => {
                "Provide additional strategic context in 2-3 sentences."
            }
        }
    }

    fn max_tokens(&self) -> u32 {
        match self {
            CommentaryKind::TeamMacro => 200,
            _ => 150,
        }
    }
}

/// Optional free-text commentary producer.
///
/// The single entry point takes a subject line plus the computed metric
/// lines and always returns a string; callers attach it as an optional
/// field on their result.
pub struct TextEnricher {
    backend: Option<Arc<dyn AiBackend>>,
}

impl TextEnricher {
    pub fn new(backend: Arc<dyn AiBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// An enricher with no backend; commentary yields the sentinel.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Generate commentary for a set of computed metric lines.
    ///
    /// Never fails: unconfigured yields [`NOT_CONFIGURED`], a backend error
    /// yields an inline diagnostic.
    pub async fn commentary(
        &self,
        kind: CommentaryKind,
        subject: &str,
        metric_lines: &[String],
    ) -> String {
        let Some(backend) = &self.backend else {
            return NOT_CONFIGURED.to_string();
        };

        let mut prompt = format!("As an esports analyst, review {subject}.\n\n");
        for line in metric_lines {
            prompt.push_str("- ");
            prompt.push_str(line);
            prompt.push('\n');
        }
        prompt.push('\n');
        prompt.push_str(kind.framing());

        let request = ChatRequest::new(vec![
            ChatMessage::system(kind.system_prompt()),
            ChatMessage::user(prompt),
        ])
        .with_temperature(0.7)
        .with_max_tokens(kind.max_tokens());

        debug!(backend = backend.name(), ?kind, "requesting AI commentary");

        match backend.chat(request).await {
            Ok(response) => response.content.trim().to_string(),
            Err(e) => {
                warn!("AI commentary failed: {}", e);
                format!("AI commentary temporarily unavailable: {e}")
            }
        }
    }
}
