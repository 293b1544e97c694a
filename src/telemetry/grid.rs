//! GRID stats API client.
//!
//! Talks to two GRID surfaces: the central-data GraphQL endpoint for series
//! listings and metadata, and the file-download endpoint for full series
//! end states. Errors are classified from HTTP status codes into the typed
//! taxonomy in [`super::TelemetryError`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use super::{TelemetryError, TelemetrySource};
use crate::models::{SeriesDetails, SeriesRef, SeriesState};

const RECENT_SERIES_QUERY: &str = r#"
query GetRecentSeries($titleId: ID!, $limit: Int!) {
  allSeries(
    first: $limit,
    filter: {
      titleId: $titleId
      types: ESPORTS
    }
    orderBy: StartTimeScheduled
    orderDirection: DESC
  ) {
    edges {
      node {
        id
        title {
          name
        }
        tournament {
          name
        }
      }
    }
  }
}
"#;

const SERIES_DETAILS_QUERY: &str = r#"
query GetSeriesDetails($seriesId: ID!) {
  series(id: $seriesId) {
    id
    name
    tournament {
      name
    }
    teams {
      name
    }
  }
}
"#;

/// Client configuration resolved from [`crate::config::GridConfig`].
#[derive(Debug, Clone)]
pub struct GridClientConfig {
    pub api_key: String,
    pub central_data_url: Url,
    pub file_download_url: Url,
    pub timeout_seconds: u64,
}

/// HTTP client for the GRID stats API.
pub struct GridClient {
    client: reqwest::Client,
    config: GridClientConfig,
}

impl GridClient {
    pub fn new(config: GridClientConfig) -> Result<Self, TelemetryError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Map a transport error, surfacing deadline overruns as the distinct
    /// timeout kind.
    fn transport_error(&self, e: reqwest::Error) -> TelemetryError {
        if e.is_timeout() {
            TelemetryError::Timeout(self.config.timeout_seconds)
        } else {
            TelemetryError::Http(e)
        }
    }

    async fn graphql<T: for<'de> Deserialize<'de>>(
        &self,
        query: &str,
        variables: serde_json::Value,
        scope: &str,
    ) -> Result<T, TelemetryError> {
        debug!(endpoint = %self.config.central_data_url, scope, "GRID GraphQL request");

        let response = self
            .client
            .post(self.config.central_data_url.clone())
            .header("x-api-key", &self.config.api_key)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            StatusCode::FORBIDDEN => {
                return Err(TelemetryError::PermissionDenied {
                    scope: scope.to_string(),
                })
            }
            StatusCode::NOT_FOUND => {
                return Err(TelemetryError::NotFound {
                    id: scope.to_string(),
                })
            }
            status if !status.is_success() => {
                return Err(TelemetryError::Malformed(format!(
                    "GraphQL request failed with status {status}"
                )))
            }
            _ => {}
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| TelemetryError::Malformed(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(TelemetryError::Malformed(messages.join("; ")));
        }

        envelope
            .data
            .ok_or_else(|| TelemetryError::Malformed("response carried no data".to_string()))
    }
}

#[async_trait]
impl TelemetrySource for GridClient {
    async fn recent_series(
        &self,
        title_id: u32,
        limit: u32,
    ) -> Result<Vec<SeriesRef>, TelemetryError> {
        let variables = json!({ "titleId": title_id.to_string(), "limit": limit });
        let data: AllSeriesData = self
            .graphql(RECENT_SERIES_QUERY, variables, "central-data")
            .await?;

        Ok(data
            .all_series
            .edges
            .into_iter()
            .map(|edge| SeriesRef {
                id: edge.node.id,
                tournament: edge.node.tournament.map(|t| t.name),
                title_name: edge.node.title.map(|t| t.name),
            })
            .collect())
    }

    async fn series_state(&self, series_id: &str) -> Result<SeriesState, TelemetryError> {
        let url = self
            .config
            .file_download_url
            .join(series_id)
            .map_err(|e| TelemetryError::Malformed(format!("bad series id: {e}")))?;

        debug!(%url, "GRID end-state request");

        let response = self
            .client
            .get(url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        match response.status() {
            StatusCode::FORBIDDEN => {
                return Err(TelemetryError::PermissionDenied {
                    scope: "file-download".to_string(),
                })
            }
            StatusCode::NOT_FOUND => {
                return Err(TelemetryError::NotFound {
                    id: series_id.to_string(),
                })
            }
            status if !status.is_success() => {
                return Err(TelemetryError::Malformed(format!(
                    "end-state request failed with status {status}"
                )))
            }
            _ => {}
        }

        response
            .json()
            .await
            .map_err(|e| TelemetryError::Malformed(e.to_string()))
    }

    async fn series_details(&self, series_id: &str) -> Result<SeriesDetails, TelemetryError> {
        let variables = json!({ "seriesId": series_id });
        let data: SeriesData = self
            .graphql(SERIES_DETAILS_QUERY, variables, series_id)
            .await?;

        let node = data.series.ok_or_else(|| TelemetryError::NotFound {
            id: series_id.to_string(),
        })?;

        Ok(SeriesDetails {
            id: node.id,
            name: node.name,
            tournament: node.tournament.map(|t| t.name),
            teams: node.teams.into_iter().map(|t| t.name).collect(),
        })
    }
}

// ── GraphQL wire shapes ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct AllSeriesData {
    #[serde(rename = "allSeries")]
    all_series: SeriesConnection,
}

#[derive(Debug, Deserialize)]
struct SeriesConnection {
    #[serde(default)]
    edges: Vec<SeriesEdge>,
}

#[derive(Debug, Deserialize)]
struct SeriesEdge {
    node: SeriesNode,
}

#[derive(Debug, Deserialize)]
struct SeriesNode {
    id: String,
    #[serde(default)]
    title: Option<NamedRef>,
    #[serde(default)]
    tournament: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeriesData {
    series: Option<SeriesDetailsNode>,
}

#[derive(Debug, Deserialize)]
struct SeriesDetailsNode {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tournament: Option<NamedRef>,
    #[serde(default)]
    teams: Vec<NamedRef>,
}
