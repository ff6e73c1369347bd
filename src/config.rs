//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

use crate::cache::{DEFAULT_TTL_SECS, MAX_TTL_SECS};

/// Which key-value store backs the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// External Redis server
    Redis,
    /// In-process store, for local runs without Redis
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL
    pub redis_url: String,
    /// Lifetime in seconds of a cached page
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Store implementation to use
    pub store_backend: StoreBackend,
    /// Interval in seconds between memory store sweeps
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis URL (default: redis://127.0.0.1:6379/)
    /// - `CACHE_TTL` - Page lifetime in seconds, 1 to one year (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STORE_BACKEND` - `redis` or `memory` (default: redis)
    /// - `CLEANUP_INTERVAL` - Memory sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ttl| (1..=MAX_TTL_SECS).contains(ttl))
                .unwrap_or(defaults.cache_ttl),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            store_backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| StoreBackend::parse(&v))
                .unwrap_or(defaults.store_backend),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379/".to_string(),
            cache_ttl: DEFAULT_TTL_SECS,
            server_port: 3000,
            store_backend: StoreBackend::Redis,
            cleanup_interval: 1,
        }
    }
}
