//! Page Cache - A Redis-backed page fetch cache
//!
//! Fetches pages over HTTP, keeps each one for a short fixed time in a
//! key-value store, and counts how often every URL is requested.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{KeyValueStore, MemoryStore, RedisStore};
pub use config::{Config, StoreBackend};
pub use error::{CacheError, Result};
pub use fetch::{CachingFetcher, HttpFetcher, PageFetcher};
pub use tasks::spawn_cleanup_task;
