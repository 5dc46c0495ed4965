//! Tiercache - A tiered response/data cache
//!
//! An in-process TTL store (L1) in front of an optional shared Redis store
//! (L2), with promotion on remote hits, write-through on sets, graceful
//! degradation when the remote tier is unavailable, and a memoizing
//! decorator for read-producing operations and whole HTTP responses.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::{response_cache, AppState};
pub use cache::{MemoizeError, TieredCache};
pub use config::Config;
pub use tasks::spawn_sweep_task;
