//! API Routes
//!
//! Configures the Axum router with all page cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{count_handler, health_handler, page_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /page?url=` - Page body, cached for the configured TTL
/// - `GET /count?url=` - Access counter for a page
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/page", get(page_handler))
        .route("/count", get(count_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::error::{CacheError, Result};
    use crate::fetch::{CachingFetcher, PageFetcher};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct OriginDown;

    #[async_trait]
    impl PageFetcher for OriginDown {
        async fn fetch(&self, url: &str) -> Result<String> {
            Err(CacheError::FetchFailed(format!("'{}' returned status 503", url)))
        }
    }

    fn create_test_app() -> Router {
        let fetcher = CachingFetcher::new(Arc::new(OriginDown), Arc::new(MemoryStore::new()));
        create_router(AppState::new(fetcher))
    }

    async fn status_of(app: Router, uri: &str) -> StatusCode {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of(create_test_app(), "/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_bad_gateway() {
        let status = status_of(create_test_app(), "/page?url=http%3A%2F%2Fexample.com").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_page_missing_url_param() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/page").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "url cannot be empty");
    }

    #[tokio::test]
    async fn test_count_endpoint() {
        let status = status_of(create_test_app(), "/count?url=http%3A%2F%2Fexample.com").await;
        assert_eq!(status, StatusCode::OK);
    }
}
