//! Cache Statistics Module
//!
//! Tracks cache performance metrics across both tiers: local hits,
//! promotions from the remote tier, overall misses, and swept entries.
//!
//! Counters are lock-free atomics so recording never contends with the
//! store lock.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Shared counters for cache performance metrics.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Lookups answered by the local tier
    local_hits: AtomicU64,
    /// Lookups answered by the remote tier (each one refills the local tier)
    promotions: AtomicU64,
    /// Lookups answered by neither tier
    misses: AtomicU64,
    /// Entries removed by the background sweep
    swept: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Local Hit ==
    pub fn record_local_hit(&self) {
        self.local_hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Promotion ==
    /// A remote hit that was copied into the local tier.
    pub fn record_promotion(&self) {
        self.promotions.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Swept ==
    /// Adds the number of entries removed by one sweep pass.
    pub fn record_swept(&self, count: usize) {
        self.swept.fetch_add(count as u64, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Produces a point-in-time serializable view of the counters.
    pub fn snapshot(&self, total_entries: usize, remote_enabled: bool) -> StatsSnapshot {
        let local_hits = self.local_hits.load(Ordering::Relaxed);
        let promotions = self.promotions.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);

        let total = local_hits + promotions + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            (local_hits + promotions) as f64 / total as f64
        };

        StatsSnapshot {
            local_hits,
            promotions,
            misses,
            hit_rate,
            swept: self.swept.load(Ordering::Relaxed),
            total_entries,
            remote_enabled,
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time cache metrics, as exposed by the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Lookups answered by the local tier
    pub local_hits: u64,
    /// Lookups answered by the remote tier
    pub promotions: u64,
    /// Lookups answered by neither tier
    pub misses: u64,
    /// (local_hits + promotions) / total lookups
    pub hit_rate: f64,
    /// Entries removed by the background sweep so far
    pub swept: u64,
    /// Current number of entries in the local tier
    pub total_entries: usize,
    /// Whether a remote tier is configured
    pub remote_enabled: bool,
}
