//! Cache Module
//!
//! A tiered cache: an in-process store with TTL expiration (L1) in front of
//! an optional shared Redis store (L2), plus a memoizing decorator for
//! read-producing operations.

mod entry;
mod local;
mod memoize;
mod remote;
mod stats;
mod tiered;


// Re-export public types
pub use entry::CacheEntry;
pub use local::LocalStore;
pub use memoize::MemoizeError;
pub use remote::{RedisStore, RemoteTier};
pub use stats::{CacheStats, StatsSnapshot};
pub use tiered::TieredCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// TTL applied when the caller does not specify one (seconds)
pub const DEFAULT_TTL_SECS: u64 = 300;

/// TTL applied to entries promoted from the remote tier (seconds)
pub const PROMOTION_TTL_SECS: u64 = 60;
