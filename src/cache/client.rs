//! Read-through inventory cache
//!
//! Wraps any [`DropletApi`] with the file snapshot: reads are served from the
//! snapshot while it is fresh, otherwise the inventory is fetched once and
//! the snapshot replaced before returning.

use std::sync::Mutex;
use std::time::SystemTime;

use crate::cache::{CacheOptions, CacheState, SnapshotFile};
use crate::client::{Droplet, DropletApi};
use crate::error::{CacheError, Result};

type Clock = Box<dyn Fn() -> SystemTime + Send + Sync>;

/// Read-through, time-bounded cache of the droplet inventory.
///
/// Within one process the first successful read is memoized, so repeated
/// reads observe the same snapshot. A refresh either replaces the snapshot
/// completely or leaves it untouched.
pub struct InventoryCache<C: DropletApi> {
    api: C,
    auth_token: String,
    snapshot: SnapshotFile,
    window_minutes: i64,
    clock: Clock,
    loaded: Mutex<Option<Vec<Droplet>>>,
}

impl<C: DropletApi> InventoryCache<C> {
    /// Create a cache over `api`, authenticating fetches with `auth_token`
    pub fn new(api: C, auth_token: impl Into<String>, options: CacheOptions) -> Self {
        Self {
            api,
            auth_token: auth_token.into(),
            snapshot: SnapshotFile::new(options.path),
            window_minutes: options.window_minutes,
            clock: Box::new(SystemTime::now),
            loaded: Mutex::new(None),
        }
    }

    /// Replace the wall clock used for freshness checks
    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl Fn() -> SystemTime + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The backing snapshot file
    #[cfg(test)]
    pub fn snapshot(&self) -> &SnapshotFile {
        &self.snapshot
    }

    /// Current state of the snapshot file
    pub fn state(&self) -> Result<CacheState> {
        Ok(self.snapshot.state((self.clock)(), self.window_minutes)?)
    }

    /// Return the inventory, refreshing the snapshot first if it is missing,
    /// stale, or unreadable.
    pub async fn get_droplets(&self) -> Result<Vec<Droplet>> {
        if let Some(droplets) = self.memoized() {
            return Ok(droplets);
        }

        let droplets = match self.state()? {
            CacheState::Fresh { age } => match self.snapshot.load() {
                Ok(droplets) => {
                    log::debug!(
                        "Cache hit: {} droplets, {}s old",
                        droplets.len(),
                        age.as_secs()
                    );
                    droplets
                }
                Err(CacheError::Read { path, reason }) => {
                    log::warn!("Cache file {} unreadable ({}), refreshing", path, reason);
                    self.refresh().await.map_err(|fetch_err| CacheError::Read {
                        path,
                        reason: format!("{}; refresh also failed: {}", reason, fetch_err),
                    })?
                }
                Err(other) => return Err(other.into()),
            },
            CacheState::Stale { age } => {
                log::debug!("Cache stale ({}s old), refreshing", age.as_secs());
                self.refresh().await?
            }
            CacheState::Missing => {
                log::debug!("Cache miss: {}", self.snapshot.path().display());
                self.refresh().await?
            }
        };

        self.memoize(&droplets);
        Ok(droplets)
    }

    /// Fetch the inventory and replace the snapshot regardless of its age.
    ///
    /// On failure the existing snapshot is left untouched and the error is
    /// returned.
    pub async fn force_refresh(&self) -> Result<()> {
        let droplets = self.refresh().await?;
        self.memoize(&droplets);
        Ok(())
    }

    async fn refresh(&self) -> Result<Vec<Droplet>> {
        let droplets = self.api.list_droplets(&self.auth_token).await?;
        self.snapshot.store(&droplets)?;
        log::info!(
            "Refreshed inventory cache with {} droplets",
            droplets.len()
        );
        Ok(droplets)
    }

    fn memoized(&self) -> Option<Vec<Droplet>> {
        self.loaded.lock().ok()?.clone()
    }

    fn memoize(&self, droplets: &[Droplet]) {
        if let Ok(mut guard) = self.loaded.lock() {
            *guard = Some(droplets.to_vec());
        }
    }
}
