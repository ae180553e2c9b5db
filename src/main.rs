//! dropletconn - list, filter, and SSH into DigitalOcean droplets

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod ssh;

use cli::{CacheCommands, Cli, CommandContext, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Config => cli::config::run(&opts),
        Commands::Connect { name, ssh_args } => {
            let ctx = CommandContext::new(&opts).await?;
            cli::connect::run(&ctx, &name, &ssh_args).await
        }
        Commands::List {
            filters,
            list_public_ip,
        } => {
            let ctx = CommandContext::new(&opts).await?;
            cli::list::run(&ctx, &filters, list_public_ip).await
        }
        Commands::Run {
            filter,
            command,
            yes,
        } => {
            let ctx = CommandContext::new(&opts).await?;
            cli::run::run(&ctx, &filter, &command, yes).await
        }
        Commands::Test { filters } => {
            let ctx = CommandContext::new(&opts).await?;
            cli::probe::run(&ctx, &filters).await
        }
        Commands::Completion { fragment } => {
            let ctx = CommandContext::new(&opts).await?;
            cli::completion::names(&ctx, &fragment).await
        }
        Commands::Completions { shell } => cli::completion::script(shell),
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => {
                if opts.force_update {
                    CommandContext::new(&opts).await?;
                }
                cli::cache::status(&opts)
            }
            CacheCommands::Clear => cli::cache::clear(&opts),
            CacheCommands::Path => cli::cache::path(&opts),
        },
        Commands::Unknown(args) => {
            let name = args.first().map(String::as_str).unwrap_or_default();
            println!("Unknown command: {}", name);
            Ok(())
        }
    }
}
