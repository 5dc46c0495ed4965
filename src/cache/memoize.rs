//! Memoize Module
//!
//! Wraps an arbitrary read-producing operation so that repeated calls with
//! the same key return the cached value without re-invoking the operation.
//! The operation stays oblivious to caching; it only produces its value.

use std::future::Future;

use serde_json::Value;
use thiserror::Error;

use crate::cache::TieredCache;

// == Memoize Error ==
/// Errors surfaced by [`TieredCache::memoize`].
///
/// A failure of the wrapped operation is passed through verbatim; the only
/// error the decorator itself can add is TTL misuse.
#[derive(Debug, Error)]
pub enum MemoizeError<E> {
    /// A zero TTL supplied to the decorator
    #[error("Invalid TTL: {0}")]
    InvalidTtl(u64),

    /// The wrapped operation failed; nothing was cached
    #[error(transparent)]
    Produce(E),
}

impl TieredCache {
    // == Memoize ==
    /// Returns the cached value for `key`, invoking `produce` only on a
    /// miss.
    ///
    /// On a miss, `produce` runs exactly once synchronously with respect to
    /// this caller and its value is stored under `ttl_seconds` before being
    /// returned. Concurrent callers that miss the same key each run their
    /// own `produce`; cached values are disposable recomputable artifacts,
    /// so the duplicated work is accepted rather than coordinated away.
    ///
    /// If `produce` fails, its error propagates unchanged and nothing is
    /// cached for `key`.
    pub async fn memoize<E, F, Fut>(
        &self,
        key: &str,
        ttl_seconds: u64,
        produce: F,
    ) -> Result<Value, MemoizeError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if ttl_seconds == 0 {
            return Err(MemoizeError::InvalidTtl(ttl_seconds));
        }

        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        let value = produce().await.map_err(MemoizeError::Produce)?;

        // The TTL was validated above, so the store cannot refuse it.
        let _ = self.set(key, value.clone(), Some(ttl_seconds)).await;

        Ok(value)
    }
}
