//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Entries are immutable after creation: an update to a key replaces the
/// whole entry, so a reader never observes a partially written value.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// TTL validation happens at the cache boundary; by the time an entry is
    /// constructed the TTL is known to be positive.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();

        // Saturate so an absurdly large (but positive) TTL clamps to
        // "effectively never" instead of wrapping into the past.
        Self {
            value,
            stored_at: now,
            expires_at: now.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// time is greater than or equal to the expiration time, so once the TTL
    /// duration has fully elapsed the entry is immediately absent to readers.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        let now = current_timestamp_ms();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            0
        }
    }

    /// Returns remaining TTL in whole seconds, for API responses.
    pub fn ttl_remaining(&self) -> u64 {
        self.ttl_remaining_ms() / 1000
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
