//! File-backed snapshot storage
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the snapshot, so the snapshot path always holds a complete document.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;

use crate::client::Droplet;
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// Freshness of the snapshot file relative to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No snapshot file exists
    Missing,
    /// Snapshot exists but its age is at or beyond the window
    Stale { age: Duration },
    /// Snapshot exists and is younger than the window
    Fresh { age: Duration },
}

/// True if a file modified at `modified` is still fresh at `now`.
///
/// Fresh means strictly younger than the window: an age exactly equal to the
/// window is stale. A non-positive window is never fresh. A modification time
/// in the future counts as age zero.
pub fn is_fresh(modified: SystemTime, now: SystemTime, window_minutes: i64) -> bool {
    if window_minutes <= 0 {
        return false;
    }
    let window = Duration::from_secs((window_minutes as u64).saturating_mul(60));
    age_at(modified, now) < window
}

fn age_at(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}

/// The on-disk inventory snapshot
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last modification time, or `None` if the file does not exist
    pub fn modified(&self) -> Result<Option<SystemTime>> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => meta.modified().map(Some).map_err(|e| self.read_error(e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.read_error(e)),
        }
    }

    /// Classify the snapshot against a freshness window
    pub fn state(&self, now: SystemTime, window_minutes: i64) -> Result<CacheState> {
        let Some(modified) = self.modified()? else {
            return Ok(CacheState::Missing);
        };

        let age = age_at(modified, now);
        if is_fresh(modified, now, window_minutes) {
            Ok(CacheState::Fresh { age })
        } else {
            Ok(CacheState::Stale { age })
        }
    }

    /// Read and parse the snapshot
    pub fn load(&self) -> Result<Vec<Droplet>> {
        let data = std::fs::read(&self.path).map_err(|e| self.read_error(e))?;
        serde_json::from_slice(&data).map_err(|e| self.read_error(e))
    }

    /// Replace the snapshot with `droplets`.
    ///
    /// On any failure the previous snapshot (or its absence) is left as it was.
    pub fn store(&self, droplets: &[Droplet]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.write_error(e))?;

        let data = serde_json::to_vec_pretty(droplets).map_err(|e| self.write_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(&data).map_err(|e| self.write_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        log::debug!(
            "Wrote {} droplets to {}",
            droplets.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Delete the snapshot. Returns false if there was nothing to delete.
    pub fn remove(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.write_error(e)),
        }
    }

    fn read_error(&self, reason: impl std::fmt::Display) -> CacheError {
        CacheError::Read {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl std::fmt::Display) -> CacheError {
        CacheError::Write {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}
