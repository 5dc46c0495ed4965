//! TTL Sweep Task
//!
//! Background task that periodically removes expired entries from the local
//! tier. The sweep reclaims memory only; expiration-on-read in the local
//! store is what makes `get` correct, independent of sweep timing.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TieredCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between passes.
///
/// # Arguments
/// * `cache` - Handle to the tiered cache (clones share the local store)
/// * `sweep_interval_secs` - Interval in seconds between sweep passes
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_sweep_task(cache: TieredCache, sweep_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.sweep().await;

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
