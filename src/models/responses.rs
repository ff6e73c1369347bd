//! Response DTOs for the page cache API
//!
//! Defines the structure of outgoing JSON response bodies. Pages themselves
//! are returned as raw HTML.

use serde::Serialize;

/// Response body for `GET /count`
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    /// The page URL
    pub url: String,
    /// Number of successful fetches of the page
    pub count: i64,
}

impl CountResponse {
    /// Creates a new CountResponse
    pub fn new(url: impl Into<String>, count: i64) -> Self {
        Self {
            url: url.into(),
            count,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
