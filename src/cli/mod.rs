//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod completion;
pub mod config;
pub mod connect;
pub mod context;
pub mod list;
pub mod probe;
pub mod run;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// dropletconn - list, filter, and SSH into DigitalOcean droplets
#[derive(Parser, Debug)]
#[command(name = "dropletconn")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Refresh the droplet cache before running the command
    #[arg(long, global = true, env = "DROPLETCONN_FORCE_UPDATE", hide_env = true)]
    pub force_update: bool,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "DROPLETCONN_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override settings file location
    #[arg(long, global = true, env = "DROPLETCONN_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "DROPLETCONN_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Custom API host (testing)
    #[arg(long, global = true, env = "DROPLETCONN_API_HOST", hide = true)]
    pub api_host: Option<String>,

    /// ssh client binary
    #[arg(
        long,
        global = true,
        env = "DROPLETCONN_SSH_BIN",
        default_value = crate::ssh::DEFAULT_SSH_BIN,
        hide = true
    )]
    pub ssh_bin: String,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the settings file interactively
    Config,

    /// SSH into a droplet by name
    #[command(
        visible_alias = "c",
        after_help = "EXAMPLES:\n  \
            dropletconn connect web-1\n  \
            dropletconn c web-1 -p 2222 -A"
    )]
    Connect {
        /// Droplet name (exact, case-insensitive)
        name: String,

        /// Extra arguments passed to ssh verbatim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        ssh_args: Vec<String>,
    },

    /// List droplets, optionally filtered by name or IP substring
    #[command(visible_alias = "l")]
    List {
        /// Filter expressions; a droplet matches if any expression matches
        filters: Vec<String>,

        /// Print only the public IP of each matched droplet
        #[arg(long)]
        list_public_ip: bool,
    },

    /// Run a command over SSH on every matched droplet
    #[command(
        visible_alias = "r",
        after_help = "EXAMPLES:\n  \
            dropletconn run web 'sudo systemctl restart nginx'\n  \
            dropletconn run db uptime --yes"
    )]
    Run {
        /// Filter expression selecting the droplets
        filter: String,

        /// Remote command
        command: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Check SSH reachability of droplets
    #[command(visible_alias = "t")]
    Test {
        /// Filter expressions (default: every droplet)
        filters: Vec<String>,
    },

    /// Print droplet names containing a substring (for shell completion)
    Completion {
        /// Name fragment (case-insensitive)
        #[arg(default_value = "")]
        fragment: String,
    },

    /// Generate a shell completion script
    #[command(after_help = "\
  bash:   dropletconn completions bash > /etc/bash_completion.d/dropletconn
  zsh:    dropletconn completions zsh > \"${fpath[1]}/_dropletconn\"
  fish:   dropletconn completions fish > ~/.config/fish/completions/dropletconn.fish")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Manage the local inventory cache
    #[command(subcommand)]
    Cache(CacheCommands),

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache location, age, and freshness
    Status,
    /// Delete the cache file
    Clear,
    /// Print cache file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["dropletconn"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_alias_and_flag() {
        let cli = parse(&["l", "db", "web", "--list-public-ip"]);
        match cli.command {
            Commands::List {
                filters,
                list_public_ip,
            } => {
                assert_eq!(filters, vec!["db", "web"]);
                assert!(list_public_ip);
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_connect_passes_extra_ssh_args() {
        let cli = parse(&["c", "web-1", "-p", "2222", "-A"]);
        match cli.command {
            Commands::Connect { name, ssh_args } => {
                assert_eq!(name, "web-1");
                assert_eq!(ssh_args, vec!["-p", "2222", "-A"]);
            }
            other => panic!("Expected connect, got {:?}", other),
        }
    }

    #[test]
    fn test_run_takes_filter_and_command() {
        let cli = parse(&["r", "web", "uptime", "-y"]);
        match cli.command {
            Commands::Run {
                filter,
                command,
                yes,
            } => {
                assert_eq!(filter, "web");
                assert_eq!(command, "uptime");
                assert!(yes);
            }
            other => panic!("Expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_force_update_is_global() {
        let cli = parse(&["list", "--force-update"]);
        assert!(cli.force_update);
    }

    #[test]
    fn test_completion_default_fragment() {
        let cli = parse(&["completion"]);
        assert!(matches!(cli.command, Commands::Completion { fragment } if fragment.is_empty()));
    }

    #[test]
    fn test_unknown_command_captured() {
        let cli = parse(&["frobnicate", "x"]);
        match cli.command {
            Commands::Unknown(args) => assert_eq!(args, vec!["frobnicate", "x"]),
            other => panic!("Expected unknown, got {:?}", other),
        }
    }
}
