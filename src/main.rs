mod aggregator;
mod config;
mod dates;
mod feed;
mod image;
mod loader;
mod routes;
mod selection;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::aggregator::Aggregator;
use crate::config::Config;
use crate::loader::FeedLoader;
use crate::routes::{AppState, LoadState};

const CONFIG_FILE: &str = "feedwall.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedwall=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The source list is compiled in; the config file only exists to
    // repoint the conversion endpoint or bind address when needed.
    let config = if std::path::Path::new(CONFIG_FILE).exists() {
        Config::load(CONFIG_FILE)?
    } else {
        Config::default()
    };
    info!("Configured {} feed sources", config.sources.len());

    let state = Arc::new(AppState::new());

    // Kick off the one startup aggregation; the index page shows the
    // loading state until it settles.
    let aggregator = Aggregator::new(
        FeedLoader::new(&config.api_endpoint),
        config.sources.clone(),
        config.entry_limit,
    );
    let bg_state = state.clone();
    tokio::spawn(async move {
        let result = aggregator.get_all().await;
        if !result.is_complete() {
            warn!("{} source(s) failed during aggregation", result.failures.len());
        }
        *bg_state.feeds.write().await = LoadState::Settled(result);
    });

    // Build router
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server starting on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
