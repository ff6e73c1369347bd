//! Error types for the page cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the page cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The key-value store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The underlying page fetch failed (network error or non-success status)
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Store answered but with something unusable
    #[error("Internal error: {0}")]
    Internal(String),
}

// == Conversions ==
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            CacheError::StoreUnavailable(err.to_string())
        } else {
            CacheError::Internal(format!("store replied with an error: {}", err))
        }
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        CacheError::FetchFailed(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::StoreUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            CacheError::FetchFailed(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the page cache.
pub type Result<T> = std::result::Result<T, CacheError>;
