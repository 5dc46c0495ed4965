//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored payload
    pub value: Value,
    /// Remaining TTL in seconds, if the entry is in the local tier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_remaining: Option<u64>,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: Value, ttl_remaining: Option<u64>) -> Self {
        Self {
            key: key.into(),
            value,
            ttl_remaining,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
///
/// Deletes are idempotent, so this is returned whether or not the key was
/// present.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered by the local tier
    pub local_hits: u64,
    /// Lookups answered by the remote tier
    pub promotions: u64,
    /// Lookups answered by neither tier
    pub misses: u64,
    /// Overall hit rate across both tiers
    pub hit_rate: f64,
    /// Entries removed by the background sweep
    pub swept: u64,
    /// Current number of entries in the local tier
    pub total_entries: usize,
    /// Whether a remote tier is configured
    pub remote_enabled: bool,
}

impl From<crate::cache::StatsSnapshot> for StatsResponse {
    fn from(snapshot: crate::cache::StatsSnapshot) -> Self {
        Self {
            local_hits: snapshot.local_hits,
            promotions: snapshot.promotions,
            misses: snapshot.misses,
            hit_rate: snapshot.hit_rate,
            swept: snapshot.swept,
            total_entries: snapshot.total_entries,
            remote_enabled: snapshot.remote_enabled,
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

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
