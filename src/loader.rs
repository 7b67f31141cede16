use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

use crate::feed::{ApiResponse, Feed};

/// Errors from a single source fetch. The loader is a pass-through
/// adapter: it classifies failures but never retries them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to feed conversion API failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("feed conversion API returned status {0}")]
    Status(StatusCode),
    #[error("malformed feed payload: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Adapter around the hosted feed-conversion service. One `fetch` call
/// makes exactly one outbound request.
pub struct FeedLoader {
    client: Client,
    endpoint: String,
}

impl FeedLoader {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("FeedWall/1.0 (feed aggregator)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub async fn fetch(&self, source_url: &str, limit: u32) -> Result<Feed, LoadError> {
        debug!("Fetching feed via conversion API: {}", source_url);

        let limit = limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("v", "1.0"), ("q", source_url), ("num", limit.as_str())])
            .send()
            .await
            .map_err(LoadError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }

        let bytes = response.bytes().await.map_err(LoadError::Transport)?;
        let payload: ApiResponse =
            serde_json::from_slice(&bytes).map_err(LoadError::Malformed)?;

        Ok(payload.response_data.feed)
    }
}
