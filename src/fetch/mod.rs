//! Fetch Module
//!
//! The page-fetch interface, its HTTP implementation, and the caching
//! decorator that wraps any implementation of it.

mod caching;
mod http;


use async_trait::async_trait;

use crate::error::Result;

pub use caching::CachingFetcher;
pub use http::HttpFetcher;

/// Something that can turn a URL into page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of `url` as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}
