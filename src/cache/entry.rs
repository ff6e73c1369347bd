//! Stored Value Module
//!
//! Defines a single value held by the in-memory store, with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

// == Stored Value ==
/// Represents a single value in the in-memory store.
#[derive(Debug, Clone)]
pub struct StoredValue {
    /// The raw stored bytes
    pub value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoredValue {
    // == Constructor ==
    /// Creates a new value with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The bytes to store
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(value: Vec<u8>, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds
            .map(|ttl| current_timestamp_ms().saturating_add(ttl.saturating_mul(1000)));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the value has expired.
    ///
    /// A value is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
