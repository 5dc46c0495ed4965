//! Local Store Module
//!
//! The L1 tier: an in-process HashMap with lazy TTL expiration.
//!
//! Expiration-on-read is authoritative; the periodic sweep (see
//! `tasks::sweep`) only reclaims memory and is never required for a `get`
//! to return the correct answer.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::CacheEntry;

// == Local Store ==
/// In-process key-value storage with per-entry TTL.
///
/// The store owns its entries exclusively. Callers share it behind
/// `Arc<RwLock<LocalStore>>`; all methods take `&mut self` or `&self`
/// accordingly and perform no I/O.
#[derive(Debug, Default)]
pub struct LocalStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
}

impl LocalStore {
    // == Constructor ==
    /// Creates a new empty LocalStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An expired-but-not-yet-swept entry is treated as absent and removed
    /// on the spot, so readers never depend on sweep timing.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                return None;
            }
            return Some(entry.value.clone());
        }
        None
    }

    // == Set ==
    /// Inserts or replaces the entry for `key`, recording the current time
    /// as its creation instant.
    ///
    /// The TTL has already been validated (and defaulted) at the tiered
    /// cache boundary, so no error is possible here.
    pub fn set(&mut self, key: String, value: Value, ttl_seconds: u64) {
        self.entries.insert(key, CacheEntry::new(value, ttl_seconds));
    }

    // == Delete ==
    /// Removes the entry if present. Deleting a non-existent key is a
    /// no-op, not an error.
    ///
    /// Returns whether an entry was actually removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Contains ==
    /// Checks whether a non-expired entry exists for `key` without touching
    /// the entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    // == TTL Remaining ==
    /// Returns the remaining TTL in seconds for a live entry.
    pub fn ttl_remaining(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.ttl_remaining())
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Advisory cleanup for memory reclamation; returns the number of
    /// entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired stragglers included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
