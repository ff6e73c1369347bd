//! API Handlers
//!
//! HTTP request handlers for each page cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

use crate::error::{CacheError, Result};
use crate::fetch::{CachingFetcher, PageFetcher};
use crate::models::{CountResponse, HealthResponse, PageQuery};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The caching fetcher every request goes through
    pub fetcher: Arc<CachingFetcher>,
}

impl AppState {
    /// Creates a new AppState around the given fetcher.
    pub fn new(fetcher: CachingFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

/// Handler for GET /page?url=
///
/// Returns the page body, from cache while fresh.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let body = state.fetcher.fetch(&query.url).await?;
    Ok(Html(body))
}

/// Handler for GET /count?url=
///
/// Reports how many times the page has been served.
pub async fn count_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<CountResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let count = state.fetcher.access_count(&query.url).await?;
    Ok(Json(CountResponse::new(query.url, count)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
