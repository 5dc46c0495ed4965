//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;

use crate::cache::{DEFAULT_TTL_SECS, PROMOTION_TTL_SECS};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. A missing `REDIS_URL` is a fully supported mode: the cache
/// then runs local-only.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default TTL in seconds for entries without explicit TTL
    pub default_ttl: u64,
    /// TTL in seconds for entries promoted from the remote tier
    pub promotion_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Per-command timeout for the remote tier in milliseconds
    pub remote_timeout_ms: u64,
    /// Optional remote cache endpoint (e.g. `redis://127.0.0.1:6379/`)
    pub redis_url: Option<String>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `PROMOTION_TTL` - Promotion TTL in seconds (default: 60)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `REMOTE_TIMEOUT_MS` - Remote command timeout (default: 1000)
    /// - `REDIS_URL` - Remote cache endpoint (default: none, local-only)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_SECS),
            promotion_ttl: env::var("PROMOTION_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(PROMOTION_TTL_SECS),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            remote_timeout_ms: env::var("REMOTE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL_SECS,
            promotion_ttl: PROMOTION_TTL_SECS,
            sweep_interval: 60,
            remote_timeout_ms: 1000,
            redis_url: None,
            server_port: 3000,
        }
    }
}
