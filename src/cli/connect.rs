//! Connect command implementation

use crate::cli::CommandContext;
use crate::client::{Droplet, DropletApi};
use crate::error::{Error, Result};
use crate::models::find_by_exact_name;
use crate::ssh::{SshDefaults, ssh_args};

/// Run the connect command: open an interactive ssh session to `name`
pub async fn run<C: DropletApi>(
    ctx: &CommandContext<C>,
    name: &str,
    extra: &[String],
) -> Result<()> {
    let droplets = ctx.inventory.get_droplets().await?;
    let args = connect_args(&droplets, name, &ctx.ssh_defaults()?, extra)?;

    ctx.ssh.run_attached(&args)
}

/// Resolve `name` to a droplet and build its ssh arguments
fn connect_args(
    droplets: &[Droplet],
    name: &str,
    defaults: &SshDefaults,
    extra: &[String],
) -> Result<Vec<String>> {
    let droplet =
        find_by_exact_name(droplets, name).ok_or_else(|| Error::NoMatch(name.to_string()))?;
    log::debug!("Connecting to droplet {} ({})", droplet.name, droplet.id);

    ssh_args(droplet, defaults, extra)
}
