// Upstream seat history API client (GET /v1/seats/history/{crn})

use futures_util::future::BoxFuture;
use thiserror::Error;
use tracing::instrument;

use crate::models::{HistoryResponse, Snapshot};
use crate::version::USER_AGENT;

/// Identifies what a fetch was issued for. A completion is only applied while the
/// view still wants the same tag; anything else is a stale response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTag {
    pub identifier: String,
    pub optimized: bool,
}

/// One history request, as built by the chart view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub tag: RequestTag,
    /// Bare page loads (no CRN in the path) send no `optimized` flag.
    pub send_optimized_flag: bool,
}

impl HistoryRequest {
    /// Path and query relative to the API root.
    pub fn path_and_query(&self) -> String {
        let mut path = format!(
            "/v1/seats/history/{}",
            urlencoding::encode(&self.tag.identifier)
        );
        if self.send_optimized_flag {
            path.push_str(if self.tag.optimized {
                "?optimized=1"
            } else {
                "?optimized=0"
            });
        }
        path
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path_and_query())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("history request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("history API answered {status}")]
    Status { status: u16 },
    #[error("history body is not valid JSON: {0}")]
    Decode(String),
}

/// What a successful fetch means for the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(Vec<Snapshot>),
    NoResults,
}

impl FetchOutcome {
    /// `warning: "no_results"` wins over any `history` field; an empty history
    /// has nothing to chart and is treated the same way.
    pub fn from_response(response: HistoryResponse) -> Self {
        if response.is_no_results() || response.history.is_empty() {
            FetchOutcome::NoResults
        } else {
            FetchOutcome::Loaded(response.history)
        }
    }
}

/// Anything that can answer a history request (the real API, or a stub in tests).
pub trait HistorySource: Send + Sync {
    fn fetch<'a>(
        &'a self,
        request: &'a HistoryRequest,
    ) -> BoxFuture<'a, Result<HistoryResponse, FetchError>>;
}

#[derive(Clone)]
pub struct HistoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HistoryClient {
    /// No request timeout: a hung upstream leaves the page loading, same as a failed one.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, request), fields(client = "history", operation = "fetch_history", identifier = %request.tag.identifier))]
    async fn get_history(&self, request: &HistoryRequest) -> Result<HistoryResponse, FetchError> {
        let url = request.url(&self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await.map_err(FetchError::Transport)?;
        let history: HistoryResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        tracing::debug!(
            snapshots_count = history.history.len(),
            warning = history.warning.as_deref(),
            "History fetched"
        );
        Ok(history)
    }
}

impl HistorySource for HistoryClient {
    fn fetch<'a>(
        &'a self,
        request: &'a HistoryRequest,
    ) -> BoxFuture<'a, Result<HistoryResponse, FetchError>> {
        Box::pin(self.get_history(request))
    }
}
