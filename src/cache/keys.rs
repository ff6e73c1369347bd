//! Cache Key Module
//!
//! Derives store keys from a page URL. The URL is appended verbatim after a
//! fixed prefix, so distinct URLs never share a key and a content key never
//! equals a counter key.

/// Prefix of the key holding a cached page body
pub const CACHE_KEY_PREFIX: &str = "cache:";

/// Prefix of the key holding a page's access counter
pub const COUNT_KEY_PREFIX: &str = "count:";

/// Key under which the body fetched from `url` is cached.
pub fn cache_key(url: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, url)
}

/// Key under which requests for `url` are counted.
pub fn count_key(url: &str) -> String {
    format!("{}{}", COUNT_KEY_PREFIX, url)
}
