//! Caching Fetcher
//!
//! Decorates a [`PageFetcher`] with a short-lived page cache and a per-URL
//! access counter, both held in a [`KeyValueStore`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::PageFetcher;
use crate::cache::{cache_key, count_key, KeyValueStore, DEFAULT_TTL_SECS, MAX_TTL_SECS};
use crate::error::{CacheError, Result};

// == Caching Fetcher ==
/// Serves pages from the store while fresh, fetching through the wrapped
/// fetcher otherwise. Every successful call bumps the URL's counter once.
///
/// Keys are `cache:{url}` for the body and `count:{url}` for the counter.
#[derive(Clone)]
pub struct CachingFetcher {
    inner: Arc<dyn PageFetcher>,
    store: Arc<dyn KeyValueStore>,
    ttl_secs: u64,
}

impl fmt::Debug for CachingFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingFetcher")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl CachingFetcher {
    // == Constructor ==
    /// Wraps `inner`, caching in `store` for the default 10 seconds.
    pub fn new(inner: Arc<dyn PageFetcher>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner,
            store,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    /// Overrides how long a fetched page stays cached. Zero is ignored and
    /// anything above [`MAX_TTL_SECS`] is clamped to it.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        if ttl_secs > 0 {
            self.ttl_secs = ttl_secs.min(MAX_TTL_SECS);
        }
        self
    }

    /// Seconds a fetched page stays cached.
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    // == Access Count ==
    /// Number of successful fetches of `url` so far. Reading does not count.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        let key = count_key(url);
        match self.store.get(&key).await? {
            Some(raw) => std::str::from_utf8(&raw)
                .ok()
                .and_then(|text| text.parse::<i64>().ok())
                .ok_or_else(|| {
                    CacheError::Internal(format!("counter '{}' is not an integer", key))
                }),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl PageFetcher for CachingFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let cache_key = cache_key(url);
        let count_key = count_key(url);

        if let Some(raw) = self.store.get(&cache_key).await? {
            let body = String::from_utf8(raw).map_err(|e| {
                CacheError::Internal(format!("cached page at '{}' is not UTF-8: {}", cache_key, e))
            })?;
            let count = self.store.incr(&count_key).await?;
            debug!("Cache hit for {} (count={})", url, count);
            return Ok(body);
        }

        debug!("Cache miss for {}", url);
        let body = self.inner.fetch(url).await.map_err(|e| {
            warn!("Fetching {} failed: {}", url, e);
            e
        })?;

        let count = self
            .store
            .store_and_count(&cache_key, self.ttl_secs, body.as_bytes(), &count_key)
            .await?;
        debug!("Cached {} for {}s (count={})", url, self.ttl_secs, count);

        Ok(body)
    }
}
