//! DigitalOcean API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod digitalocean;
pub mod models;

pub use digitalocean::DigitalOceanClient;
#[cfg(test)]
pub use mock::MockDropletClient;
pub use models::Droplet;

/// Remote inventory source.
///
/// Implementations perform exactly one request per call; there is no retry
/// and no pagination beyond the first page.
#[async_trait]
pub trait DropletApi: Send + Sync {
    /// Fetch the full droplet inventory using the given bearer token
    async fn list_droplets(&self, auth_token: &str) -> Result<Vec<Droplet>>;
}
