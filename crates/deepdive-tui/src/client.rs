// Upstream summary client.
//
// `SummarySource` is the seam between the TUI and the stats provider: the
// HTTP implementation talks to the provider, tests substitute an in-memory
// source. Fetch tasks report back to the TUI loop over an mpsc channel.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::protocol::{LoadedSummary, UiUpdate};
use crate::search::SummaryQuery;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API base URL {url:?}: {message}")]
    BadBaseUrl { url: String, message: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("response from {url} is not JSON: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// SummarySource
// ---------------------------------------------------------------------------

/// Anything that can answer a summary query with a JSON payload.
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn fetch_summary(&self, query: &SummaryQuery) -> Result<Value, FetchError>;
}

/// Fetches summaries from the provider over HTTP.
pub struct HttpSummarySource {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpSummarySource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| FetchError::BadBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::BadBaseUrl {
                url: base_url.to_string(),
                message: "URL cannot carry a path".into(),
            });
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn summary_url(&self, query: &SummaryQuery) -> Result<Url, FetchError> {
        query
            .summary_url(&self.base_url)
            .ok_or_else(|| FetchError::BadBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot carry a path".into(),
            })
    }
}

#[async_trait]
impl SummarySource for HttpSummarySource {
    /// GET the summary and decode the body as JSON whatever the status code;
    /// provider errors usually arrive as `{"error": ...}` bodies and render
    /// as "no results".
    async fn fetch_summary(&self, query: &SummaryQuery) -> Result<Value, FetchError> {
        let url = self.summary_url(query)?;
        let url_str = url.to_string();

        let response = self
            .http
            .get(url)
            .header("cache-control", "no-store")
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url_str.clone(),
                source: e,
            })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url_str.clone(),
            source: e,
        })?;
        info!(%status, bytes = body.len(), "summary response from {url_str}");

        decode_body(&url_str, &body)
    }
}

/// Parse a response body as JSON.
pub fn decode_body(url: &str, body: &str) -> Result<Value, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Fetch task
// ---------------------------------------------------------------------------

/// Run one query against `source` and report the outcome on `tx`.
///
/// Never cancelled: every submission reports, and the TUI keeps whichever
/// outcome arrives last.
pub async fn fetch_and_report(
    source: Arc<dyn SummarySource>,
    query: SummaryQuery,
    generation: u64,
    tx: mpsc::Sender<UiUpdate>,
) {
    let player = query.name.display();
    info!(%player, seasons = ?query.seasons, generation, "fetching summary");

    let update = match source.fetch_summary(&query).await {
        Ok(payload) => UiUpdate::SummaryLoaded(Box::new(LoadedSummary {
            player,
            seasons: query.seasons,
            payload,
            received_at: Local::now(),
            generation,
        })),
        Err(e) => {
            warn!(%player, generation, "summary fetch failed: {e}");
            UiUpdate::FetchFailed {
                player,
                message: e.to_string(),
                generation,
            }
        }
    };

    if tx.send(update).await.is_err() {
        warn!(generation, "UI channel closed before fetch result was delivered");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
