//! Cache management commands

use std::time::{Duration, SystemTime};

use colored::Colorize;

use crate::cache::{CacheState, SnapshotFile};
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Settings;
use crate::error::Result;

/// Resolve the snapshot file from settings without requiring a token
fn snapshot(opts: &GlobalOptions) -> Result<(Settings, SnapshotFile)> {
    let settings = Settings::load_at(opts.config_ref())?;
    let file = SnapshotFile::new(settings.cache_path()?);
    Ok((settings, file))
}

/// Show cache location, age, freshness and size
pub fn status(opts: &GlobalOptions) -> Result<()> {
    let (settings, file) = snapshot(opts)?;
    let state = file.state(SystemTime::now(), settings.cache_duration)?;

    let (age, fresh) = match state {
        CacheState::Missing => (None, false),
        CacheState::Stale { age } => (Some(age), false),
        CacheState::Fresh { age } => (Some(age), true),
    };

    let droplets = match state {
        CacheState::Missing => None,
        // An unreadable file is reported, not fatal here
        _ => file.load().ok().map(|d| d.len()),
    };
    let size = std::fs::metadata(file.path()).map(|m| m.len()).ok();
    let updated = file.modified()?.map(|t| {
        chrono::DateTime::<chrono::Local>::from(t)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    });

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": file.path().display().to_string(),
                "exists": age.is_some(),
                "age_seconds": age.map(|a| a.as_secs()),
                "window_minutes": settings.cache_duration,
                "fresh": fresh,
                "droplets": droplets,
                "size_bytes": size,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", file.path().display());

            let Some(age) = age else {
                println!("State:          {}", "missing".yellow());
                return Ok(());
            };

            let label = if fresh {
                "fresh".green()
            } else {
                "stale".yellow()
            };
            println!("State:          {}", label);
            println!(
                "Age:            {} (window {} min)",
                format_age(age),
                settings.cache_duration
            );
            if let Some(updated) = updated {
                println!("Updated:        {}", updated);
            }
            match droplets {
                Some(count) => println!("Droplets:       {}", count),
                None => println!("Droplets:       {}", "unreadable".red()),
            }
            if let Some(size) = size {
                println!("Total size:     {}", format_size(size));
            }
        }
    }

    Ok(())
}

/// Delete the cache file
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let (_, file) = snapshot(opts)?;
    let removed = file.remove()?;

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "path": file.path().display().to_string(),
                "removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => {
            if removed {
                println!("Cleared cache file {}", file.path().display());
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show cache path
pub fn path(opts: &GlobalOptions) -> Result<()> {
    let (_, file) = snapshot(opts)?;
    println!("{}", file.path().display());
    Ok(())
}

/// Format bytes as human-readable size
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format an age as the largest whole unit plus remainder
fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs >= 3600 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}
