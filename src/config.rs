use serde::Deserialize;
use std::path::Path;

/// Endpoint of the hosted feed-conversion service. Each source URL is sent
/// here as a query parameter and comes back as structured JSON.
const DEFAULT_API_ENDPOINT: &str = "https://ajax.googleapis.com/ajax/services/feed/load";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    /// Maximum entries requested per source
    #[serde(default = "default_entry_limit")]
    pub entry_limit: u32,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_sources")]
    pub sources: Vec<FeedSource>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub url: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_entry_limit() -> u32 {
    10
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_sources() -> Vec<FeedSource> {
    [
        "http://feeds.feedburner.com/TechCrunch/",
        "http://feeds.arstechnica.com/arstechnica/index",
        "http://feeds.feedburner.com/GoogleEarthBlog",
        "http://feeds.gawker.com/gizmodo/full",
    ]
    .into_iter()
    .map(FeedSource::new)
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            entry_limit: default_entry_limit(),
            bind_addr: default_bind_addr(),
            sources: default_sources(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
