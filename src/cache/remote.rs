//! Remote Store Adapter Module
//!
//! The optional L2 tier: a shared Redis cache behind a trait seam.
//!
//! Every failure mode of the remote service is absorbed here. Callers see
//! "absent" on a failed read and a silent no-op on a failed write, with a
//! `tracing::warn!` emitted for operator visibility. The adapter owns only
//! the connection to the remote store, never the data itself.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde_json::Value;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Timeout for the one-time connection attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// == Remote Tier Trait ==
/// Best-effort operations against a shared external cache.
///
/// Implementations must never surface an error: connectivity and protocol
/// failures degrade to a miss (`get`) or a dropped write (`set`/`delete`).
#[async_trait]
pub trait RemoteTier: Send + Sync {
    /// Returns the value for `key`, or None on absence or any failure.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` with the given TTL, best-effort.
    async fn set(&self, key: &str, value: &Value, ttl_seconds: u64);

    /// Removes `key`, best-effort.
    async fn delete(&self, key: &str);
}

// == Redis Store ==
/// Redis-backed implementation of the remote tier.
///
/// The connection is established lazily on first use. If that attempt fails,
/// the adapter latches into a permanent disabled state and every subsequent
/// operation short-circuits without touching the network, so a remote outage
/// cannot add per-request latency.
pub struct RedisStore {
    client: redis::Client,
    /// `Some(manager)` once connected, `None` once the adapter is disabled.
    conn: OnceCell<Option<ConnectionManager>>,
    /// Cap on every remote command
    op_timeout: Duration,
}

impl RedisStore {
    // == Constructor ==
    /// Creates an adapter for the given Redis URL.
    ///
    /// A malformed URL is a startup-time condition: it is logged and yields
    /// `None`, leaving the cache in local-only mode.
    pub fn connect(url: &str, op_timeout: Duration) -> Option<Self> {
        match redis::Client::open(url) {
            Ok(client) => Some(Self {
                client,
                conn: OnceCell::new(),
                op_timeout,
            }),
            Err(e) => {
                warn!(url = %url, error = %e, "Invalid Redis URL, remote tier disabled");
                None
            }
        }
    }

    // == Connection ==
    /// Returns the shared connection manager, attempting the connection
    /// exactly once. A failed attempt is cached as `None`.
    async fn connection(&self) -> Option<ConnectionManager> {
        self.conn
            .get_or_init(|| async {
                match timeout(CONNECT_TIMEOUT, self.client.get_connection_manager()).await {
                    Ok(Ok(manager)) => {
                        debug!("Connected to remote cache");
                        Some(manager)
                    }
                    Ok(Err(e)) => {
                        warn!(error = %e, "Remote cache unreachable, remote tier disabled");
                        None
                    }
                    Err(_) => {
                        warn!("Remote cache connection timed out, remote tier disabled");
                        None
                    }
                }
            })
            .await
            .clone()
    }
}

#[async_trait]
impl RemoteTier for RedisStore {
    async fn get(&self, key: &str) -> Option<Value> {
        let mut conn = self.connection().await?;

        match timeout(self.op_timeout, conn.get::<_, Option<String>>(key)).await {
            Ok(Ok(Some(raw))) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = %key, error = %e, "Undecodable remote cache payload, treating as miss");
                    None
                }
            },
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                warn!(key = %key, error = %e, "Remote GET failed, treating as miss");
                None
            }
            Err(_) => {
                warn!(key = %key, "Remote GET timed out, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &Value, ttl_seconds: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let payload = value.to_string();
        match timeout(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(key, payload, ttl_seconds),
        )
        .await
        {
            Ok(Ok(())) => {
                debug!(key = %key, ttl_seconds = %ttl_seconds, "Remote SET complete");
            }
            Ok(Err(e)) => {
                warn!(key = %key, error = %e, "Remote SET failed, write dropped");
            }
            Err(_) => {
                warn!(key = %key, "Remote SET timed out, write dropped");
            }
        }
    }

    async fn delete(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        match timeout(self.op_timeout, conn.del::<_, ()>(key)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(key = %key, error = %e, "Remote DELETE failed");
            }
            Err(_) => {
                warn!(key = %key, "Remote DELETE timed out");
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connect_rejects_malformed_url() {
        assert!(RedisStore::connect("not a url", Duration::from_secs(1)).is_none());
    }

    #[tokio::test]
    async fn test_unreachable_remote_degrades_to_miss() {
        // Nothing listens on this port; the connection attempt fails fast
        // and latches the adapter into its disabled state.
        let store = RedisStore::connect("redis://127.0.0.1:1/", Duration::from_secs(1)).unwrap();

        assert_eq!(store.get("k").await, None);
        // Writes and deletes are silent no-ops once disabled.
        store.set("k", &json!("v"), 60).await;
        store.delete("k").await;
        assert_eq!(store.get("k").await, None);
    }
}
