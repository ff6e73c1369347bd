//! Request DTOs for the page cache API
//!
//! Defines the query parameters accepted by the HTTP front.

use serde::Deserialize;

/// Query string for `GET /page` and `GET /count`
///
/// # Fields
/// - `url`: The page to fetch or report on
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// The page URL, passed to the fetcher unchanged
    #[serde(default)]
    pub url: String,
}

impl PageQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid. The URL
    /// format itself is left to the fetcher.
    pub fn validate(&self) -> Option<String> {
        if self.url.trim().is_empty() {
            return Some("url cannot be empty".to_string());
        }
        None
    }
}
