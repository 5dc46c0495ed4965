//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{RedisStore, RemoteTier, TieredCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The tiered cache is constructed once by the host application and
/// dependency-injected here; handlers hold clones of the same handle.
#[derive(Clone)]
pub struct AppState {
    /// The shared tiered cache
    pub cache: TieredCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: TieredCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// A configured `redis_url` attaches the remote tier; without one the
    /// cache runs local-only. The actual connection attempt is deferred to
    /// first use, so startup never blocks on the remote service.
    pub fn from_config(config: &Config) -> Self {
        let remote: Option<Arc<dyn RemoteTier>> = config.redis_url.as_deref().and_then(|url| {
            RedisStore::connect(url, Duration::from_millis(config.remote_timeout_ms))
                .map(|store| Arc::new(store) as Arc<dyn RemoteTier>)
        });

        Self::new(TieredCache::with_remote(
            remote,
            config.default_ttl,
            config.promotion_ttl,
        ))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in both cache tiers with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    // Validate request (empty key, oversized key, non-positive TTL)
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl_seconds();
    state.cache.set(&req.key, req.value, ttl).await?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache, consulting the local tier first and
/// falling back to the remote tier.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .await
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    let ttl_remaining = state.cache.ttl_remaining(&key).await;

    Ok(Json(GetResponse::new(key, value, ttl_remaining)))
}

/// Handler for DELETE /del/:key
///
/// Deletes a key from both tiers. Idempotent: deleting an absent key still
/// succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.cache.delete(&key).await;

    Json(DeleteResponse::new(key))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.cache.stats().await;

    Json(StatsResponse::from(snapshot))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_state() -> AppState {
        AppState::new(TieredCache::local_only(300, 60))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let req = SetRequest {
            key: "test_key".to_string(),
            value: json!("test_value"),
            ttl: None,
        };
        let result = set_handler(State(state.clone()), Json(req)).await;
        assert!(result.is_ok());

        let result = get_handler(State(state.clone()), Path("test_key".to_string())).await;
        let response = result.unwrap();
        assert_eq!(response.value, json!("test_value"));
        assert!(response.ttl_remaining.is_some());
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler_is_idempotent() {
        let state = test_state();

        let req = SetRequest {
            key: "to_delete".to_string(),
            value: json!("value"),
            ttl: None,
        };
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        // Second delete of the same key is still fine
        delete_handler(State(state.clone()), Path("to_delete".to_string())).await;

        let result = get_handler(State(state), Path("to_delete".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_set_handler_with_explicit_ttl() {
        let state = test_state();

        let req = SetRequest {
            key: "ttl_key".to_string(),
            value: json!({"name": "Ada"}),
            ttl: Some(300),
        };
        set_handler(State(state.clone()), Json(req)).await.unwrap();

        let response = get_handler(State(state), Path("ttl_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, json!({"name": "Ada"}));
        assert!(response.ttl_remaining.unwrap() <= 300);
    }

    #[tokio::test]
    async fn test_set_rejects_zero_ttl() {
        let state = test_state();

        let req = SetRequest {
            key: "key".to_string(),
            value: json!("value"),
            ttl: Some(0),
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.local_hits, 0);
        assert_eq!(response.misses, 0);
        assert!(!response.remote_enabled);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let req = SetRequest {
            key: "".to_string(), // Empty key is invalid
            value: json!("value"),
            ttl: None,
        };
        let result = set_handler(State(state), Json(req)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_from_config_without_redis_is_local_only() {
        let state = AppState::from_config(&Config::default());

        state.cache.set("k", json!("v"), None).await.unwrap();
        assert_eq!(state.cache.get("k").await, Some(json!("v")));
        assert!(!state.cache.stats().await.remote_enabled);
    }
}
