//! HTTP Fetcher
//!
//! Plain GET of a page over one reused reqwest client.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::PageFetcher;
use crate::error::{CacheError, Result};

/// Fetches pages with a single long-lived HTTP client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own HTTP client.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("page_cache/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CacheError::FetchFailed(format!(
                "'{}' returned status {}",
                url, status
            )));
        }

        let body = response.text().await?;
        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use std::net::SocketAddr;

    async fn spawn_origin() -> SocketAddr {
        let app = Router::new()
            .route("/", get(|| async { "<html><body>hello</body></html>" }))
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, "no such page") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let addr = spawn_origin().await;
        let fetcher = HttpFetcher::new().unwrap();

        let body = fetcher.fetch(&format!("http://{}/", addr)).await.unwrap();
        assert_eq!(body, "<html><body>hello</body></html>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let addr = spawn_origin().await;
        let fetcher = HttpFetcher::new().unwrap();

        let result = fetcher.fetch(&format!("http://{}/missing", addr)).await;
        match result {
            Err(CacheError::FetchFailed(msg)) => assert!(msg.contains("404")),
            other => panic!("expected FetchFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_url() {
        let fetcher = HttpFetcher::new().unwrap();

        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(CacheError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let fetcher = HttpFetcher::new().unwrap();

        let result = fetcher.fetch("http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(CacheError::FetchFailed(_))));
    }
}
