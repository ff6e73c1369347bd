//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired values out of the memory store

mod cleanup;

pub use cleanup::spawn_cleanup_task;
