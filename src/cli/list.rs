//! List command implementation

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{Droplet, DropletApi};
use crate::error::Result;
use crate::models::{DropletDisplay, FilterSet};
use crate::output;

/// Run the list command
pub async fn run<C: DropletApi>(
    ctx: &CommandContext<C>,
    filters: &[String],
    list_public_ip: bool,
) -> Result<()> {
    let droplets = ctx.inventory.get_droplets().await?;
    if droplets.is_empty() {
        println!("No droplets found in account");
        return Ok(());
    }

    let filter = FilterSet::new(filters);
    let matched = filter.apply(&droplets);
    log::debug!("{} of {} droplets matched", matched.len(), droplets.len());

    if list_public_ip {
        print!("{}", public_ip_lines(&matched));
        eprintln!("Total: {}", matched.len());
        return Ok(());
    }

    if matched.is_empty() {
        println!("No droplets match the given filters");
        return Ok(());
    }

    let rows: Vec<DropletDisplay> = matched.iter().copied().map(DropletDisplay::from).collect();
    output::print(rows.as_slice(), ctx.format)?;

    match ctx.format {
        OutputFormat::Table => println!("Total: {}", matched.len()),
        OutputFormat::Json => eprintln!("Total: {}", matched.len()),
    }

    Ok(())
}

/// One line per droplet holding its first public address.
///
/// Droplets without a public address are skipped.
fn public_ip_lines(droplets: &[&Droplet]) -> String {
    droplets
        .iter()
        .filter_map(|d| d.addresses().first_public().map(str::to_string))
        .map(|ip| ip + "\n")
        .collect()
}
