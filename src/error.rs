//! Error types for the dropletconn CLI

use thiserror::Error;

/// Result type alias for dropletconn operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("No droplet named \"{0}\" found. Run `dropletconn list` to see available droplets.")]
    NoMatch(String),

    #[error("No public IP address found for droplet \"{0}\"")]
    NoPublicAddress(String),

    #[error("SSH failed: {message}")]
    Ssh { message: String, code: Option<i32> },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// Process exit code for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 78,
            Error::Api(_) => 69,
            Error::Cache(_) => 74,
            Error::Ssh { code, .. } => code.unwrap_or(255),
            _ => 1,
        }
    }
}

/// Errors reported by the remote inventory fetcher
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unable to fetch droplets: authentication failed. Check the token with `dropletconn config`.")]
    Unauthorized,

    #[error("Unable to fetch droplets: expected 200, got {status} as response status")]
    Status { status: u16, body: String },

    #[error("Unable to fetch droplets: network error: {0}")]
    Network(String),

    #[error("Unable to fetch droplets: invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Unable to open config file at \"{0}\". If the file does not exist, you can create it using the `config` command."
    )]
    NotFound(String),

    #[error(
        "Unable to read config file at \"{path}\": {reason}. You can recreate it using the `config` command."
    )]
    Unreadable { path: String, reason: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Token is empty. Please update config file with `dropletconn config`.")]
    MissingToken,

    #[error("Could not determine home directory")]
    NoHome,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Inventory cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Unable to read cache file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Unable to write cache file {path}: {reason}")]
    Write { path: String, reason: String },
}
