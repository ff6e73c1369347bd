//! Redis Store Module
//!
//! Production key-value store backed by a Redis server.

use std::fmt;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::KeyValueStore;
use crate::error::{CacheError, Result};

// == Redis Store ==
/// Store holding a single multiplexed connection, opened on first use and
/// reused by every call until [`KeyValueStore::close`].
pub struct RedisStore {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("addr", &self.client.get_connection_info().addr)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    // == Constructor ==
    /// Creates a store for `redis_url` without connecting yet.
    ///
    /// Fails only if the URL cannot be parsed.
    pub fn open(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            CacheError::StoreUnavailable(format!("invalid redis url '{}': {}", redis_url, e))
        })?;
        info!("Redis store configured for {}", client.get_connection_info().addr);

        Ok(Self {
            client,
            conn: Mutex::new(None),
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                warn!("Failed to connect to Redis: {}", e);
                CacheError::from(e)
            })?;
        debug!("Opened Redis connection");
        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Maps a command error, dropping the held connection when it is no longer
    /// usable so the next call reconnects.
    async fn command_failed(&self, err: redis::RedisError) -> CacheError {
        let err = CacheError::from(err);
        if matches!(err, CacheError::StoreUnavailable(_)) {
            warn!("Redis connection lost: {}", err);
            self.conn.lock().await.take();
        }
        err
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        match conn.get::<_, Option<Vec<u8>>>(key).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: &[u8]) -> Result<()> {
        let mut conn = self.connection().await?;
        match conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        match conn.incr::<_, _, i64>(key, 1).await {
            Ok(count) => Ok(count),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    /// Runs SETEX and INCR inside one MULTI/EXEC transaction.
    ///
    /// EXEC does not roll back a failed INCR, so the counter is checked
    /// first and a non-integer counter fails before the body is written.
    async fn store_and_count(
        &self,
        cache_key: &str,
        ttl_secs: u64,
        value: &[u8],
        count_key: &str,
    ) -> Result<i64> {
        let mut conn = self.connection().await?;
        let current = match conn.get::<_, Option<String>>(count_key).await {
            Ok(current) => current,
            Err(e) => return Err(self.command_failed(e).await),
        };
        if let Some(current) = current {
            if current.parse::<i64>().is_err() {
                return Err(CacheError::Internal(format!(
                    "counter '{}' is not an integer",
                    count_key
                )));
            }
        }

        let reply: redis::RedisResult<(i64,)> = redis::pipe()
            .atomic()
            .set_ex(cache_key, value, ttl_secs)
            .ignore()
            .incr(count_key, 1)
            .query_async(&mut conn)
            .await;

        match reply {
            Ok((count,)) => Ok(count),
            Err(e) => Err(self.command_failed(e).await),
        }
    }

    async fn close(&self) -> Result<()> {
        if self.conn.lock().await.take().is_some() {
            info!("Closed Redis connection");
        }
        Ok(())
    }
}
