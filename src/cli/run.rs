//! Run command implementation

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::cli::CommandContext;
use crate::client::DropletApi;
use crate::error::Result;
use crate::models::{DropletDisplay, FilterSet};
use crate::output::table::format_table;
use crate::ssh::ssh_args;

/// Run `command` over ssh on every droplet matching `filter`, one at a time.
///
/// The matched droplets are shown first and the user must confirm with `y`
/// unless `yes` is set. The first failing ssh invocation stops the run.
pub async fn run<C: DropletApi>(
    ctx: &CommandContext<C>,
    filter: &str,
    command: &str,
    yes: bool,
) -> Result<()> {
    let droplets = ctx.inventory.get_droplets().await?;
    let matched = FilterSet::new([filter]).apply(&droplets);

    if matched.is_empty() {
        println!("No droplets match \"{}\"", filter);
        return Ok(());
    }

    let rows: Vec<DropletDisplay> = matched.iter().copied().map(DropletDisplay::from).collect();
    println!("{}", format_table(&rows));
    println!("Command: {}", command.bold());

    if !yes && !confirm(&mut std::io::stdin().lock())? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }

    let defaults = ctx.ssh_defaults()?;
    let remote = vec![command.to_string()];

    for droplet in matched {
        let args = ssh_args(droplet, &defaults, &remote)?;

        println!(
            "{}",
            format!("==> {} ({})", droplet.name, args[0]).cyan().bold()
        );
        ctx.ssh.run_attached(&args)?;
        println!("{}", format!("<== {} done", droplet.name).green());
    }

    Ok(())
}

/// Prompt on stdout and read one answer line from `input`
fn confirm(input: &mut impl BufRead) -> Result<bool> {
    print!("Run on these droplets? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_confirmation(&answer))
}

/// Only a lone `y` or `Y` confirms
fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y")
}
