//! Config command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::{DEFAULT_CACHE_DURATION, DEFAULT_CACHE_FILE_NAME, Settings, WizardAnswers};
use crate::error::{ConfigError, Result};

/// Run the interactive settings wizard
///
/// Prompts for each setting, applies defaults for blank answers and writes
/// the settings file. An empty token aborts before anything else is asked.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let path = Settings::resolve_path(opts.config_ref())?;

    println!("{}", "dropletconn configuration".bold().green());
    println!("Settings will be written to {}\n", path.display());

    if path.exists() {
        let overwrite = Confirm::with_theme(&theme)
            .with_prompt("A settings file already exists. Overwrite it?")
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", "Configuration unchanged.".yellow());
            return Ok(());
        }
    }

    let token: String = Password::with_theme(&theme)
        .with_prompt("DigitalOcean API token")
        .allow_empty_password(true)
        .interact()?;
    if token.trim().is_empty() {
        return Err(ConfigError::MissingToken.into());
    }

    let cache_file_name: String = Input::with_theme(&theme)
        .with_prompt("Cache file (relative to home)")
        .default(DEFAULT_CACHE_FILE_NAME.to_string())
        .interact_text()?;

    let cache_duration: String = Input::with_theme(&theme)
        .with_prompt("Cache duration in minutes")
        .default(DEFAULT_CACHE_DURATION.to_string())
        .interact_text()?;

    let default_user: String = Input::with_theme(&theme)
        .with_prompt("Default ssh user (blank for none)")
        .allow_empty(true)
        .interact_text()?;

    let default_key_file_name: String = Input::with_theme(&theme)
        .with_prompt("Default ssh key file (blank for none)")
        .allow_empty(true)
        .interact_text()?;

    let settings = Settings::try_from(WizardAnswers {
        token,
        cache_file_name,
        cache_duration,
        default_user,
        default_key_file_name,
    })?;

    let saved = settings.save_at(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        saved.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - List your droplets", "dropletconn list".cyan());
    println!(
        "  {} - Connect to a droplet",
        "dropletconn connect <name>".cyan()
    );

    Ok(())
}
