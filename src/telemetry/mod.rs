//! Telemetry source abstraction.
//!
//! The coach pulls series data from an upstream stats provider. The
//! provider is behind the [`TelemetrySource`] trait so the API layer and
//! tests never touch the wire, and every upstream failure arrives as a
//! typed [`TelemetryError`] classified by the client from status codes and
//! response shape, never from error-message text.

pub mod grid;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::warn;

use crate::models::{SeriesDetails, SeriesRef, SeriesState};

/// Errors from the telemetry source.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Credentials lack a permission scope. Not retryable; the caller must
    /// act on the named scope.
    #[error("upstream permission denied for {scope}")]
    PermissionDenied { scope: String },

    /// The requested identifier does not exist upstream.
    #[error("series {id} not found upstream")]
    NotFound { id: String },

    /// The response did not match the expected schema.
    #[error("malformed upstream response: {0}")]
    Malformed(String),

    /// The request exceeded the configured deadline.
    #[error("upstream request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Read access to the upstream stats provider.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Most recent series for a title, newest first.
    async fn recent_series(
        &self,
        title_id: u32,
        limit: u32,
    ) -> Result<Vec<SeriesRef>, TelemetryError>;

    /// Full end state of a concluded series.
    async fn series_state(&self, series_id: &str) -> Result<SeriesState, TelemetryError>;

    /// Series metadata only (the fallback when end-state access is
    /// forbidden).
    async fn series_details(&self, series_id: &str) -> Result<SeriesDetails, TelemetryError>;
}

/// One title's slot in a fan-out fetch.
#[derive(Debug)]
pub struct TitleFetch {
    pub title_id: u32,
    pub result: Result<Vec<SeriesRef>, TelemetryError>,
}

/// Fetch series listings for several titles concurrently.
///
/// Fans out one request per title and fans in after all complete. A
/// failing branch is captured in its own slot and never aborts siblings;
/// slots come back in the order the title ids were given.
pub async fn fetch_many(
    source: Arc<dyn TelemetrySource>,
    title_ids: &[u32],
    limit: u32,
) -> Vec<TitleFetch> {
    let mut set = JoinSet::new();
    for (index, title_id) in title_ids.iter().copied().enumerate() {
        let source = Arc::clone(&source);
        set.spawn(async move {
            let result = source.recent_series(title_id, limit).await;
            (index, title_id, result)
        });
    }

    let mut slots: Vec<Option<TitleFetch>> = title_ids.iter().map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, title_id, result)) => {
                slots[index] = Some(TitleFetch { title_id, result });
            }
            Err(e) => {
                // A panicked task loses its slot; the remaining branches
                // still complete.
                warn!("telemetry fan-out task failed: {}", e);
            }
        }
    }

    slots
        .into_iter()
        .zip(title_ids)
        .map(|(slot, title_id)| {
            slot.unwrap_or(TitleFetch {
                title_id: *title_id,
                result: Err(TelemetryError::Malformed(
                    "fetch task aborted".to_string(),
                )),
            })
        })
        .collect()
}

/// Canned telemetry for tests and the offline ingest path.
#[cfg(test)]
pub struct StaticTelemetry {
    pub series: Vec<SeriesRef>,
    pub state: Option<SeriesState>,
    pub details: Option<SeriesDetails>,
    pub fail_with: Option<fn() -> TelemetryError>,
}

#[cfg(test)]
impl StaticTelemetry {
    pub fn with_state(state: SeriesState) -> Self {
        Self {
            series: Vec::new(),
            state: Some(state),
            details: None,
            fail_with: None,
        }
    }

    pub fn failing(fail_with: fn() -> TelemetryError) -> Self {
        Self {
            series: Vec::new(),
            state: None,
            details: None,
            fail_with: Some(fail_with),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl TelemetrySource for StaticTelemetry {
    async fn recent_series(
        &self,
        _title_id: u32,
        limit: u32,
    ) -> Result<Vec<SeriesRef>, TelemetryError> {
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        Ok(self.series.iter().take(limit as usize).cloned().collect())
    }

    async fn series_state(&self, series_id: &str) -> Result<SeriesState, TelemetryError> {
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        self.state.clone().ok_or(TelemetryError::NotFound {
            id: series_id.to_string(),
        })
    }

    async fn series_details(&self, series_id: &str) -> Result<SeriesDetails, TelemetryError> {
        if let Some(fail) = self.fail_with {
            return Err(fail());
        }
        self.details.clone().ok_or(TelemetryError::NotFound {
            id: series_id.to_string(),
        })
    }
}
