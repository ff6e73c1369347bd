//! API Module
//!
//! HTTP handlers and routing for the page cache front.
//!
//! # Endpoints
//! - `GET /page?url=` - Fetch a page through the cache
//! - `GET /count?url=` - Read a page's access counter
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
