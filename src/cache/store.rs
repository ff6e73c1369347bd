//! Key-Value Store Trait
//!
//! The store collaborator the caching fetcher consumes. Only GET, SETEX and
//! INCR are needed; expiry is the store's job.

use async_trait::async_trait;

use crate::error::Result;

/// A key-value store with native expiring keys and atomic increment.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, expiring after `ttl_secs`.
    async fn set_ex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()>;

    /// Atomically adds one to the integer under `key` and returns the new
    /// value. An absent key counts from zero.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Caches `value` and counts the request as one unit.
    ///
    /// Stores that can apply both writes atomically should override this.
    async fn store_and_count(
        &self,
        cache_key: &str,
        ttl_secs: u64,
        value: &[u8],
        count_key: &str,
    ) -> Result<i64> {
        self.set_ex(cache_key, ttl_secs, value).await?;
        self.incr(count_key).await
    }

    /// Releases the store handle.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
