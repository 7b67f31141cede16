use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::aggregator::AggregationResult;
use crate::feed::{Feed, FeedEntry};
use crate::image::resolve_image;
use crate::selection::Selection;

/// What the presentation layer knows about the one startup aggregation:
/// still in flight, or settled with feeds and possibly failed sources.
pub enum LoadState {
    Loading,
    Settled(AggregationResult),
}

pub struct AppState {
    pub feeds: RwLock<LoadState>,
    pub selection: RwLock<Selection>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            feeds: RwLock::new(LoadState::Loading),
            selection: RwLock::new(Selection::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/select", get(select))
        .route("/deselect", get(deselect))
        .route("/health", get(health))
        .with_state(state)
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub loading: bool,
    pub feeds: Vec<FeedView>,
    pub failures: Vec<FailureView>,
    pub modal: Option<ModalView>,
}

pub struct FeedView {
    pub title: String,
    pub entries: Vec<EntryView>,
}

pub struct EntryView {
    pub title: String,
    pub snippet: String,
    pub link: String,
    pub published_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

pub struct FailureView {
    pub url: String,
    pub error: String,
}

pub struct ModalView {
    pub title: String,
    pub link: String,
    pub published_date: Option<DateTime<Utc>>,
    pub content: String,
}

mod filters {
    use chrono::{DateTime, Utc};

    use crate::dates;

    pub fn timeago(t: &Option<DateTime<Utc>>) -> askama::Result<String> {
        Ok(dates::time_ago(*t))
    }

    pub fn full_date(t: &Option<DateTime<Utc>>) -> askama::Result<String> {
        Ok(dates::full_date(*t))
    }
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

// Custom error type
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", self.0),
        )
            .into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

fn feed_view(feed: &Feed) -> FeedView {
    FeedView {
        title: feed.title.clone(),
        entries: feed
            .entries
            .iter()
            .map(|entry| EntryView {
                title: entry.title.clone(),
                snippet: entry.content_snippet.clone(),
                link: entry.link.clone(),
                published_date: entry.published_date,
                image: resolve_image(entry).map(str::to_string),
            })
            .collect(),
    }
}

fn modal_view(entry: &FeedEntry) -> ModalView {
    ModalView {
        title: entry.title.clone(),
        link: entry.link.clone(),
        published_date: entry.published_date,
        content: entry.content.clone(),
    }
}

// Route handlers
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let modal = state.selection.read().await.selected().map(modal_view);

    let feeds = state.feeds.read().await;
    let template = match &*feeds {
        LoadState::Loading => IndexTemplate {
            loading: true,
            feeds: Vec::new(),
            failures: Vec::new(),
            modal,
        },
        LoadState::Settled(result) => IndexTemplate {
            loading: false,
            feeds: result.feeds.iter().map(feed_view).collect(),
            failures: result
                .failures
                .iter()
                .map(|f| FailureView {
                    url: f.url.clone(),
                    error: f.error.clone(),
                })
                .collect(),
            modal,
        },
    };

    Ok(HtmlTemplate(template))
}

#[derive(Deserialize)]
pub struct SelectQuery {
    pub link: String,
}

/// The entry-selected signal. Entries are identified by link; selecting a
/// link that is not in the aggregated feeds leaves the selection alone.
pub async fn select(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SelectQuery>,
) -> Result<Redirect, AppError> {
    let entry = {
        let feeds = state.feeds.read().await;
        match &*feeds {
            LoadState::Settled(result) => result
                .feeds
                .iter()
                .flat_map(|feed| feed.entries.iter())
                .find(|entry| entry.link == query.link)
                .cloned(),
            LoadState::Loading => None,
        }
    };

    if let Some(entry) = entry {
        state.selection.write().await.select(entry);
    }

    Ok(Redirect::to("/"))
}

/// The entry-deselected signal.
pub async fn deselect(State(state): State<Arc<AppState>>) -> Redirect {
    state.selection.write().await.deselect();
    Redirect::to("/")
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
