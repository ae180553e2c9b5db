//! Global CLI options shared across all commands
//!
//! Consolidates the global flags into a single struct so handler signatures
//! stay small. Precedence is CLI flag > environment variable > default.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Custom settings file path (defaults to ~/.dropletconn.conf)
    pub config: Option<String>,

    /// Refresh the inventory cache before running the command
    pub force_update: bool,

    /// Custom API host for testing
    pub api_host: Option<String>,

    /// ssh client binary
    pub ssh_bin: String,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            force_update: cli.force_update,
            api_host: cli.api_host.clone(),
            ssh_bin: cli.ssh_bin.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}
