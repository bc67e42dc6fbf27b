//! HTTP server
//!
//! Exposes `POST /connection-details` for issuing room access tokens.

pub mod http;

pub use http::{create_router, issue, run_http_server, ApiError, AppState, INVALID_JSON_MESSAGE};
