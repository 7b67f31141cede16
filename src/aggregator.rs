use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{error, info};

use crate::config::FeedSource;
use crate::feed::Feed;
use crate::loader::FeedLoader;

/// One source that did not produce a feed, with the error it settled on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub url: String,
    pub error: String,
}

/// The combined outcome of one aggregation pass. Feeds appear in
/// completion order, not source-list order. Produced exactly once, after
/// every source has settled one way or the other.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    pub feeds: Vec<Feed>,
    pub failures: Vec<SourceFailure>,
}

impl AggregationResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fans one loader call out per configured source and joins the results.
///
/// Every source settles: a failing fetch is recorded as a `SourceFailure`
/// instead of stalling the join, so callers can always distinguish
/// "complete" from "these sources failed".
pub struct Aggregator {
    loader: FeedLoader,
    sources: Vec<FeedSource>,
    entry_limit: u32,
}

impl Aggregator {
    pub fn new(loader: FeedLoader, sources: Vec<FeedSource>, entry_limit: u32) -> Self {
        Self {
            loader,
            sources,
            entry_limit,
        }
    }

    pub async fn get_all(&self) -> AggregationResult {
        info!("Aggregating {} feed sources", self.sources.len());

        // All fetches are issued up front; FuturesUnordered yields them
        // as they finish, which fixes the output order.
        let mut pending: FuturesUnordered<_> = self
            .sources
            .iter()
            .map(|source| async move {
                let outcome = self.loader.fetch(&source.url, self.entry_limit).await;
                (source.url.clone(), outcome)
            })
            .collect();

        let mut result = AggregationResult::default();

        while let Some((url, outcome)) = pending.next().await {
            match outcome {
                Ok(feed) => {
                    info!("Fetched feed '{}' from {}", feed.title, url);
                    result.feeds.push(feed);
                }
                Err(e) => {
                    error!("Failed to fetch {}: {}", url, e);
                    result.failures.push(SourceFailure {
                        url,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Aggregation settled: {} feeds, {} failures",
            result.feeds.len(),
            result.failures.len()
        );
        result
    }
}
