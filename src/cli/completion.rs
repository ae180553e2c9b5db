//! Shell completion support
//!
//! `completion <fragment>` prints matching droplet names for use inside a
//! shell completion function; `completions <shell>` prints the static script.

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::{Cli, CommandContext};
use crate::client::DropletApi;
use crate::error::Result;
use crate::models::names_containing;

/// Print droplet names containing `fragment`, one per line
pub async fn names<C: DropletApi>(ctx: &CommandContext<C>, fragment: &str) -> Result<()> {
    let droplets = ctx.inventory.get_droplets().await?;
    for name in names_containing(&droplets, fragment) {
        println!("{}", name);
    }
    Ok(())
}

/// Write the completion script for `shell` to stdout
pub fn script(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_mentions_commands() {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        generate(Shell::Bash, &mut cmd, "dropletconn", &mut buf);

        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("dropletconn"));
        assert!(script.contains("connect"));
        assert!(script.contains("--force-update"));
    }
}
