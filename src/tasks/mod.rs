//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service
//! operation.
//!
//! # Tasks
//! - TTL Sweep: Removes expired local-tier entries at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
