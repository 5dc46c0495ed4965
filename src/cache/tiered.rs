//! Tiered Cache Module
//!
//! Composes the local store (L1) and the optional remote store adapter (L2)
//! behind a single get/set/delete contract.
//!
//! Reads go local-first; a remote hit is promoted into the local tier with a
//! short TTL so subsequent reads stay off the network. Writes go through
//! both tiers, with the remote leg issued fire-and-forget so the caller's
//! perceived success never depends on the remote service.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, LocalStore, RemoteTier, StatsSnapshot};
use crate::error::CacheError;

// == Tiered Cache ==
/// Two-tier cache handle.
///
/// Cheap to clone; all clones share the same local store, remote adapter and
/// statistics. The host application constructs one instance from its config
/// and hands clones to every collaborator that needs caching.
#[derive(Clone)]
pub struct TieredCache {
    /// L1: in-process store
    local: Arc<RwLock<LocalStore>>,
    /// L2: optional shared store
    remote: Option<Arc<dyn RemoteTier>>,
    /// Hit/miss/promotion counters
    stats: Arc<CacheStats>,
    /// TTL applied when the caller does not specify one
    default_ttl: u64,
    /// TTL applied to entries promoted from the remote tier
    promotion_ttl: u64,
}

impl TieredCache {
    // == Constructors ==
    /// Creates a local-only cache (no remote tier configured).
    pub fn local_only(default_ttl: u64, promotion_ttl: u64) -> Self {
        Self::with_remote(None, default_ttl, promotion_ttl)
    }

    /// Creates a cache backed by the given remote tier.
    pub fn with_remote(
        remote: Option<Arc<dyn RemoteTier>>,
        default_ttl: u64,
        promotion_ttl: u64,
    ) -> Self {
        Self {
            local: Arc::new(RwLock::new(LocalStore::new())),
            remote,
            stats: Arc::new(CacheStats::new()),
            default_ttl,
            promotion_ttl,
        }
    }

    // == Get ==
    /// Retrieves a value, consulting the local tier first.
    ///
    /// On a local miss the remote tier is queried; a remote hit is promoted
    /// into the local tier under the (short) promotion TTL to bound the
    /// staleness of values learned from the second source of truth.
    pub async fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.local.write().await.get(key) {
            self.stats.record_local_hit();
            return Some(value);
        }

        if let Some(remote) = &self.remote {
            if let Some(value) = remote.get(key).await {
                debug!(key = %key, "Remote hit, promoting to local tier");
                self.stats.record_promotion();
                self.local
                    .write()
                    .await
                    .set(key.to_string(), value.clone(), self.promotion_ttl);
                return Some(value);
            }
        }

        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value in both tiers (write-through).
    ///
    /// A TTL of `None` means the configured default; an explicit zero TTL is
    /// misuse and is rejected before anything is stored. The local write is
    /// synchronous; the remote write is spawned and allowed to finish in the
    /// background even if the calling request is aborted.
    pub async fn set(
        &self,
        key: &str,
        value: Value,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let ttl = self.effective_ttl(ttl_seconds)?;

        self.local
            .write()
            .await
            .set(key.to_string(), value.clone(), ttl);

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let key = key.to_string();
            tokio::spawn(async move {
                remote.set(&key, &value, ttl).await;
            });
        }

        Ok(())
    }

    // == Delete ==
    /// Removes a key from both tiers. Absence in either tier is not an
    /// error.
    pub async fn delete(&self, key: &str) {
        self.local.write().await.delete(key);

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let key = key.to_string();
            tokio::spawn(async move {
                remote.delete(&key).await;
            });
        }
    }

    // == Sweep ==
    /// Removes expired entries from the local tier, recording the count.
    pub async fn sweep(&self) -> usize {
        let removed = self.local.write().await.sweep_expired();
        self.stats.record_swept(removed);
        removed
    }

    // == Stats ==
    /// Returns a point-in-time snapshot of the cache metrics.
    pub async fn stats(&self) -> StatsSnapshot {
        let total_entries = self.local.read().await.len();
        self.stats.snapshot(total_entries, self.remote.is_some())
    }

    // == TTL Remaining ==
    /// Remaining TTL of a live local entry, for API responses.
    pub async fn ttl_remaining(&self, key: &str) -> Option<u64> {
        self.local.read().await.ttl_remaining(key)
    }

    /// Presence of a live entry in the local tier only. Used to observe
    /// promotion without going through `get`.
    pub async fn in_local(&self, key: &str) -> bool {
        self.local.read().await.contains(key)
    }

    // == Effective TTL ==
    /// Applies the default and rejects a zero TTL at the boundary.
    fn effective_ttl(&self, ttl_seconds: Option<u64>) -> Result<u64, CacheError> {
        match ttl_seconds {
            Some(0) => Err(CacheError::InvalidTtl(0)),
            Some(ttl) => Ok(ttl),
            None => Ok(self.default_ttl),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::RemoteTier;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::sleep;

    /// In-memory stand-in for the remote tier (TTL is ignored; tests that
    /// care about expiry use the local tier).
    #[derive(Default)]
    struct FakeRemote {
        entries: Mutex<HashMap<String, Value>>,
    }

    impl FakeRemote {
        fn with_entry(key: &str, value: Value) -> Arc<Self> {
            let fake = Self::default();
            fake.entries.lock().unwrap().insert(key.to_string(), value);
            Arc::new(fake)
        }

        fn contains(&self, key: &str) -> bool {
            self.entries.lock().unwrap().contains_key(key)
        }
    }

    #[async_trait]
    impl RemoteTier for FakeRemote {
        async fn get(&self, key: &str) -> Option<Value> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        async fn set(&self, key: &str, value: &Value, _ttl_seconds: u64) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.clone());
        }

        async fn delete(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }
    }

    /// Remote tier that is permanently failing: every read misses, every
    /// write vanishes. Mirrors the adapter's disabled state.
    struct DeadRemote;

    #[async_trait]
    impl RemoteTier for DeadRemote {
        async fn get(&self, _key: &str) -> Option<Value> {
            None
        }

        async fn set(&self, _key: &str, _value: &Value, _ttl_seconds: u64) {}

        async fn delete(&self, _key: &str) {}
    }

    fn local_cache() -> TieredCache {
        TieredCache::local_only(300, 60)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = local_cache();

        cache.set("key1", json!("value1"), None).await.unwrap();

        assert_eq!(cache.get("key1").await, Some(json!("value1")));
    }

    #[tokio::test]
    async fn test_get_on_empty_cache() {
        let cache = local_cache();

        assert_eq!(cache.get("anything").await, None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let cache = local_cache();

        cache.set("key1", json!("value1"), None).await.unwrap();
        cache.delete("key1").await;
        cache.delete("key1").await;

        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_zero_ttl_rejected() {
        let cache = local_cache();

        let result = cache.set("key1", json!("value1"), Some(0)).await;
        assert!(matches!(result, Err(CacheError::InvalidTtl(0))));
        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_entry_expires() {
        let cache = local_cache();

        cache.set("key1", json!("value1"), Some(1)).await.unwrap();
        assert!(cache.get("key1").await.is_some());

        sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_remote_hit_promotes_to_local() {
        let remote = FakeRemote::with_entry("key1", json!("remote_value"));
        let cache = TieredCache::with_remote(Some(remote), 300, 60);

        assert!(!cache.in_local("key1").await);

        assert_eq!(cache.get("key1").await, Some(json!("remote_value")));

        // The value now lives in the local tier as well
        assert!(cache.in_local("key1").await);

        let stats = cache.stats().await;
        assert_eq!(stats.promotions, 1);
    }

    #[tokio::test]
    async fn test_set_writes_through_to_remote() {
        let remote = Arc::new(FakeRemote::default());
        let cache = TieredCache::with_remote(Some(remote.clone()), 300, 60);

        cache.set("key1", json!("value1"), None).await.unwrap();

        // The remote leg is spawned; give it a moment to land.
        sleep(Duration::from_millis(50)).await;
        assert!(remote.contains("key1"));
    }

    #[tokio::test]
    async fn test_delete_removes_from_both_tiers() {
        let remote = FakeRemote::with_entry("key1", json!("value1"));
        let cache = TieredCache::with_remote(Some(remote.clone()), 300, 60);

        cache.set("key1", json!("value1"), None).await.unwrap();
        sleep(Duration::from_millis(50)).await;

        cache.delete("key1").await;
        sleep(Duration::from_millis(50)).await;

        assert!(!remote.contains("key1"));
        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_degraded_remote_keeps_local_semantics() {
        let cache = TieredCache::with_remote(Some(Arc::new(DeadRemote)), 300, 60);

        assert_eq!(cache.get("key1").await, None);
        cache.set("key1", json!("value1"), None).await.unwrap();
        assert_eq!(cache.get("key1").await, Some(json!("value1")));
        cache.delete("key1").await;
        assert_eq!(cache.get("key1").await, None);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let cache = local_cache();

        cache.set("key1", json!("first"), None).await.unwrap();
        cache.set("key1", json!("second"), None).await.unwrap();

        assert_eq!(cache.get("key1").await, Some(json!("second")));
    }

    #[tokio::test]
    async fn test_stats_counts_hits_and_misses() {
        let cache = local_cache();

        cache.set("key1", json!("value1"), None).await.unwrap();
        cache.get("key1").await; // local hit
        cache.get("missing").await; // miss

        let stats = cache.stats().await;
        assert_eq!(stats.local_hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert!(!stats.remote_enabled);
    }

    #[tokio::test]
    async fn test_sweep_reports_removed_count() {
        let cache = local_cache();

        cache.set("short", json!("v"), Some(1)).await.unwrap();
        cache.set("long", json!("v"), Some(60)).await.unwrap();

        sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.sweep().await, 1);
        assert_eq!(cache.stats().await.swept, 1);
    }

    #[tokio::test]
    async fn test_json_scenario_roundtrip() {
        let cache = local_cache();

        cache
            .set("user:42", json!({"name": "Ada"}), Some(300))
            .await
            .unwrap();

        assert_eq!(cache.get("user:42").await, Some(json!({"name": "Ada"})));
    }
}
