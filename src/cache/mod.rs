//! Local inventory cache
//!
//! The full droplet inventory is kept in a single pretty-printed JSON file.
//! The file's modification time is the freshness marker; a refresh replaces
//! the file atomically so readers never observe a partial snapshot.

pub mod client;
pub mod storage;

use std::path::PathBuf;

/// Where the snapshot lives and how long it stays fresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// Absolute path of the snapshot file
    pub path: PathBuf,

    /// Freshness window in minutes; zero or negative means always stale
    pub window_minutes: i64,
}

// Re-export main types
pub use client::InventoryCache;
pub use storage::{CacheState, SnapshotFile};
