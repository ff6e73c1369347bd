//! Cache Module
//!
//! Key derivation and the key-value store collaborators that hold cached
//! pages and access counters.

mod entry;
mod keys;
mod memory_store;
mod redis_store;
mod store;

// Re-export public types
pub use entry::StoredValue;
pub use keys::{cache_key, count_key, CACHE_KEY_PREFIX, COUNT_KEY_PREFIX};
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use store::KeyValueStore;

// == Public Constants ==
/// Lifetime of a cached page when none is configured
pub const DEFAULT_TTL_SECS: u64 = 10;

/// Longest lifetime a cached page may be given (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;
