//! Response Cache Middleware
//!
//! Memoizes full HTTP responses: a handler wrapped by this layer is only
//! invoked when the tiered cache has no entry for the request's path and
//! query. The handler itself stays oblivious to caching.
//!
//! Only successful (2xx) GET responses with UTF-8 bodies are captured;
//! error responses always pass through uncached so a failing handler is
//! retried on the next request.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::handlers::AppState;

/// Responses larger than this are served but not cached.
const MAX_CACHED_BODY_BYTES: usize = 1024 * 1024; // 1 MB

// == Cached Response ==
/// The slice of an HTTP response that is stored in the cache.
#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    status: u16,
    content_type: Option<String>,
    body: String,
}

impl CachedResponse {
    /// Rebuilds a response identical (status, content type, body) to the
    /// one originally produced by the wrapped handler.
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        let mut builder = Response::builder().status(status);
        if let Some(content_type) = self.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(self.body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

/// Cache key for a request: the path plus normalized query string.
fn response_key(uri: &Uri) -> String {
    match uri.query() {
        Some(query) => format!("resp:{}?{}", uri.path(), query),
        None => format!("resp:{}", uri.path()),
    }
}

// == Middleware ==
/// Axum middleware memoizing successful GET responses in the tiered cache.
///
/// Apply with `axum::middleware::from_fn_with_state(state, response_cache)`
/// on any read-only route group.
pub async fn response_cache(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let key = response_key(req.uri());

    if let Some(cached) = state.cache.get(&key).await {
        match serde_json::from_value::<CachedResponse>(cached) {
            Ok(cached) => {
                debug!(key = %key, "Serving memoized response");
                return cached.into_response();
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Undecodable cached response, evicting");
                state.cache.delete(&key).await;
            }
        }
    }

    let response = next.run(req).await;

    // Handler errors pass through untouched and uncached.
    if !response.status().is_success() {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if bytes.len() <= MAX_CACHED_BODY_BYTES {
        if let Ok(text) = std::str::from_utf8(&bytes) {
            let content_type = parts
                .headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from);

            let cached = CachedResponse {
                status: parts.status.as_u16(),
                content_type,
                body: text.to_string(),
            };

            if let Ok(value) = serde_json::to_value(&cached) {
                // Uses the configured default TTL, which is always valid.
                let _ = state.cache.set(&key, value, None).await;
            }
        }
    }

    Response::from_parts(parts, Body::from(bytes))
}
