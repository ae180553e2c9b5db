//! Command execution context
//!
//! Loads settings, validates the token, and wires the DigitalOcean client
//! behind the inventory cache so handlers only deal with droplets.

use crate::cache::{CacheOptions, InventoryCache};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{DigitalOceanClient, DropletApi};
use crate::config::Settings;
use crate::error::Result;
use crate::ssh::{SshDefaults, SshRunner};

/// Shared state for inventory-reading commands.
pub struct CommandContext<C: DropletApi = DigitalOceanClient> {
    /// Loaded settings
    pub settings: Settings,
    /// Cached droplet inventory
    pub inventory: InventoryCache<C>,
    /// ssh process launcher
    pub ssh: SshRunner,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext<DigitalOceanClient> {
    /// Load settings from the configured location and build the context.
    ///
    /// # Errors
    /// Fails if the settings file is missing or invalid, the token is empty,
    /// or `--force-update` was given and the refresh failed.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let settings = Settings::load_at(opts.config_ref())?;
        let api = DigitalOceanClient::with_host(opts.api_host_ref())?;
        Self::with_api(settings, api, opts).await
    }
}

impl<C: DropletApi> CommandContext<C> {
    /// Build a context from already-loaded settings and an API client
    pub async fn with_api(settings: Settings, api: C, opts: &GlobalOptions) -> Result<Self> {
        let token = settings.auth_token()?.to_string();
        let options = CacheOptions {
            path: settings.cache_path()?,
            window_minutes: settings.cache_duration,
        };
        let inventory = InventoryCache::new(api, token, options);

        if opts.force_update {
            log::debug!("Forcing inventory refresh");
            inventory.force_refresh().await?;
        }

        Ok(Self {
            settings,
            inventory,
            ssh: SshRunner::new(opts.ssh_bin.clone()),
            format: opts.format,
        })
    }

    /// ssh user and identity file from settings
    pub fn ssh_defaults(&self) -> Result<SshDefaults> {
        SshDefaults::from_settings(&self.settings)
    }
}
