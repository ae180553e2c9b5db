//! Test command implementation: non-interactive ssh reachability probes

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{CommandContext, OutputFormat};
use crate::client::{Droplet, DropletApi};
use crate::error::{Error, Result};
use crate::models::{FilterSet, ProbeDisplay, ProbeStatus};
use crate::output;
use crate::ssh::{SshDefaults, SshRunner, probe_args};

/// Run the test command
pub async fn run<C: DropletApi>(ctx: &CommandContext<C>, filters: &[String]) -> Result<()> {
    let droplets = ctx.inventory.get_droplets().await?;
    let targets = FilterSet::new(filters).apply(&droplets);

    if targets.is_empty() {
        println!("No droplets found");
        return Ok(());
    }

    let defaults = ctx.ssh_defaults()?;
    let progress = progress_bar(targets.len() as u64, ctx.format);

    let mut rows = Vec::with_capacity(targets.len());
    for droplet in &targets {
        progress.set_message(droplet.name.clone());
        rows.push(probe(&ctx.ssh, droplet, &defaults));
        progress.inc(1);
    }
    progress.finish_and_clear();

    output::print(rows.as_slice(), ctx.format)?;

    let reachable = rows.iter().filter(|r| r.status == ProbeStatus::Ok).count();
    let summary = format!("{}/{} droplets reachable", reachable, rows.len());
    match ctx.format {
        OutputFormat::Table => println!("{}", summary),
        OutputFormat::Json => eprintln!("{}", summary),
    }

    Ok(())
}

fn progress_bar(len: u64, format: OutputFormat) -> ProgressBar {
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::new(len).with_style(style)
}

/// Probe one droplet; every failure becomes a failed row
fn probe(runner: &SshRunner, droplet: &Droplet, defaults: &SshDefaults) -> ProbeDisplay {
    let args = match probe_args(droplet, defaults) {
        Ok(args) => args,
        Err(e) => return ProbeDisplay::new(droplet, ProbeStatus::Failed, e.to_string()),
    };

    match runner.run_captured(&args) {
        Ok(outcome) => {
            let status = if outcome.success {
                ProbeStatus::Ok
            } else {
                ProbeStatus::Failed
            };
            ProbeDisplay::new(droplet, status, first_line(&outcome.output))
        }
        Err(Error::Ssh { message, .. }) => ProbeDisplay::new(droplet, ProbeStatus::Failed, message),
        Err(e) => ProbeDisplay::new(droplet, ProbeStatus::Failed, e.to_string()),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}
