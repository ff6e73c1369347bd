//! Memory Store Module
//!
//! In-process key-value store with per-key TTL, used when no Redis server is
//! configured and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{KeyValueStore, StoredValue};
use crate::error::{CacheError, Result};

// == Memory Store ==
/// HashMap-backed store. Expired values read as absent and are swept by
/// [`MemoryStore::cleanup_expired`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired values from the store.
    ///
    /// Returns the number of values removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| !stored.is_expired());
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of values held, expired ones included until swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds nothing.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn incr_locked(entries: &mut HashMap<String, StoredValue>, key: &str) -> Result<i64> {
        let live = entries.get(key).filter(|stored| !stored.is_expired());

        let (current, expires_at) = match live {
            Some(stored) => {
                let current = std::str::from_utf8(&stored.value)
                    .ok()
                    .and_then(|text| text.parse::<i64>().ok())
                    .ok_or_else(|| {
                        CacheError::Internal(format!("value at '{}' is not an integer", key))
                    })?;
                (current, stored.expires_at)
            }
            None => (0, None),
        };

        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::Internal(format!("increment at '{}' would overflow", key))
        })?;

        let mut stored = StoredValue::new(next.to_string().into_bytes(), None);
        // INCR keeps an existing expiry
        stored.expires_at = expires_at;
        entries.insert(key.to_string(), stored);

        Ok(next)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|stored| !stored.is_expired())
            .map(|stored| stored.value.clone()))
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()> {
        if ttl_secs == 0 {
            return Err(CacheError::InvalidRequest(
                "expiry must be a positive number of seconds".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredValue::new(value.to_vec(), Some(ttl_secs)));
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;
        Self::incr_locked(&mut entries, key)
    }

    async fn store_and_count(
        &self,
        cache_key: &str,
        ttl_secs: u64,
        value: &[u8],
        count_key: &str,
    ) -> Result<i64> {
        if ttl_secs == 0 {
            return Err(CacheError::InvalidRequest(
                "expiry must be a positive number of seconds".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;
        // Validate the counter before touching the cached body.
        let count = Self::incr_locked(&mut entries, count_key)?;
        entries.insert(
            cache_key.to_string(),
            StoredValue::new(value.to_vec(), Some(ttl_secs)),
        );
        Ok(count)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_absent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cache:missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_ex_and_get() {
        let store = MemoryStore::new();

        store.set_ex("cache:a", 10, b"<p>a</p>").await.unwrap();

        assert_eq!(store.get("cache:a").await.unwrap(), Some(b"<p>a</p>".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_ex_overwrites() {
        let store = MemoryStore::new();

        store.set_ex("cache:a", 10, b"first").await.unwrap();
        store.set_ex("cache:a", 10, b"second").await.unwrap();

        assert_eq!(store.get("cache:a").await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_ex_rejects_zero_ttl() {
        let store = MemoryStore::new();

        let result = store.set_ex("cache:a", 0, b"page").await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_ex_expires() {
        let store = MemoryStore::new();

        store.set_ex("cache:a", 1, b"page").await.unwrap();
        assert!(store.get("cache:a").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.get("cache:a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_incr_counts_from_zero() {
        let store = MemoryStore::new();

        assert_eq!(store.incr("count:a").await.unwrap(), 1);
        assert_eq!(store.incr("count:a").await.unwrap(), 2);
        assert_eq!(store.incr("count:b").await.unwrap(), 1);
        assert_eq!(store.get("count:a").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_incr_non_integer() {
        let store = MemoryStore::new();
        store.set_ex("cache:a", 10, b"<html>").await.unwrap();

        let result = store.incr("cache:a").await;
        assert!(matches!(result, Err(CacheError::Internal(_))));
        assert_eq!(store.get("cache:a").await.unwrap(), Some(b"<html>".to_vec()));
    }

    #[tokio::test]
    async fn test_incr_keeps_expiry() {
        let store = MemoryStore::new();
        store.set_ex("count:a", 1, b"5").await.unwrap();

        assert_eq!(store.incr("count:a").await.unwrap(), 6);

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.get("count:a").await.unwrap(), None);
        assert_eq!(store.incr("count:a").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_and_count() {
        let store = MemoryStore::new();

        let count = store
            .store_and_count("cache:a", 10, b"page", "count:a")
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(store.get("cache:a").await.unwrap(), Some(b"page".to_vec()));
        assert_eq!(store.get("count:a").await.unwrap(), Some(b"1".to_vec()));
    }

    #[tokio::test]
    async fn test_store_and_count_leaves_nothing_on_bad_counter() {
        let store = MemoryStore::new();
        store.set_ex("count:a", 10, b"not a number").await.unwrap();

        let result = store.store_and_count("cache:a", 10, b"page", "count:a").await;

        assert!(matches!(result, Err(CacheError::Internal(_))));
        assert_eq!(store.get("cache:a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let store = MemoryStore::new();

        store.set_ex("cache:short", 1, b"a").await.unwrap();
        store.set_ex("cache:long", 10, b"b").await.unwrap();
        store.incr("count:a").await.unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let removed = store.cleanup_expired().await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 2);
        assert!(store.get("cache:long").await.unwrap().is_some());
        assert!(store.get("count:a").await.unwrap().is_some());
    }
}
