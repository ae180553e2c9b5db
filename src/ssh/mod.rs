//! SSH argument assembly and process invocation

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use crate::client::Droplet;
use crate::config::Settings;
use crate::error::{Error, Result};

/// Default ssh client binary
pub const DEFAULT_SSH_BIN: &str = "ssh";

/// Options added to `test` probes so ssh never waits for input
const PROBE_OPTIONS: [&str; 4] = ["-o", "BatchMode=yes", "-o", "ConnectTimeout=5"];

/// Remote command run by `test` probes
const PROBE_COMMAND: &str = "uptime";

/// Connection defaults taken from settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshDefaults {
    pub user: Option<String>,
    pub identity_file: Option<PathBuf>,
}

impl SshDefaults {
    /// Resolve ssh defaults from settings (identity file made absolute)
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            user: settings.ssh_user().map(str::to_string),
            identity_file: settings.ssh_key_path()?,
        })
    }
}

/// Build the ssh argument vector for `droplet`.
///
/// The first argument is the droplet's first public address, followed by
/// `-l <user>` and `-i <key>` when configured, then `extra` verbatim.
pub fn ssh_args(droplet: &Droplet, defaults: &SshDefaults, extra: &[String]) -> Result<Vec<String>> {
    let addresses = droplet.addresses();
    let host = addresses
        .first_public()
        .ok_or_else(|| Error::NoPublicAddress(droplet.name.clone()))?;

    let mut args = Vec::with_capacity(5 + extra.len());
    args.push(host.to_string());

    if let Some(user) = &defaults.user {
        args.push("-l".to_string());
        args.push(user.clone());
    }
    if let Some(key) = &defaults.identity_file {
        args.push("-i".to_string());
        args.push(key.display().to_string());
    }

    args.extend(extra.iter().cloned());
    Ok(args)
}

/// Arguments for a non-interactive reachability probe
pub fn probe_args(droplet: &Droplet, defaults: &SshDefaults) -> Result<Vec<String>> {
    let mut extra: Vec<String> = PROBE_OPTIONS.iter().map(|s| s.to_string()).collect();
    extra.push(PROBE_COMMAND.to_string());
    ssh_args(droplet, defaults, &extra)
}

/// Result of a captured ssh run
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub success: bool,
    pub output: String,
}

/// Spawns the external ssh client
#[derive(Debug, Clone)]
pub struct SshRunner {
    program: String,
}

impl Default for SshRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SSH_BIN)
    }
}

impl SshRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run ssh attached to this process's stdio and wait for it to exit.
    ///
    /// Fails with [`Error::Ssh`] if ssh cannot be started or exits non-zero.
    pub fn run_attached(&self, args: &[String]) -> Result<()> {
        log::debug!("Running {} {:?}", self.program, args);

        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        check_status(status)
    }

    /// Run ssh with stdin closed and output captured
    pub fn run_captured(&self, args: &[String]) -> Result<ProbeOutcome> {
        log::debug!("Probing {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        let stream = if output.status.success() {
            &output.stdout
        } else {
            &output.stderr
        };

        Ok(ProbeOutcome {
            success: output.status.success(),
            output: String::from_utf8_lossy(stream).trim().to_string(),
        })
    }

    fn spawn_error(&self, err: std::io::Error) -> Error {
        Error::Ssh {
            message: format!("unable to start {}: {}", self.program, err),
            code: None,
        }
    }
}

fn check_status(status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }

    Err(Error::Ssh {
        message: match status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        },
        code: status.code(),
    })
}
