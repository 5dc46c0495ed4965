//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.
//!
//! Remote-tier failures never appear here: they are absorbed (and logged)
//! inside the remote store adapter, so the only errors a caller can see are
//! its own misuse of the API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in either tier
    #[error("Key not found: {0}")]
    NotFound(String),

    /// A zero TTL supplied to a write
    #[error("Invalid TTL: {0}")]
    InvalidTtl(u64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            CacheError::InvalidTtl(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            CacheError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            CacheError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
