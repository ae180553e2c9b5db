//! Configuration management for dropletconn
//!
//! Settings live in a single file under the user's home directory. The file
//! is written as YAML; JSON settings files from older releases load as-is
//! because YAML accepts JSON documents.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Settings file name, relative to the home directory
pub const CONFIG_FILE_NAME: &str = ".dropletconn.conf";

/// Default cache file name, relative to the home directory
pub const DEFAULT_CACHE_FILE_NAME: &str = ".dropletconn.cache";

/// Default cache freshness window in minutes
pub const DEFAULT_CACHE_DURATION: i64 = 60;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// DigitalOcean API token
    #[serde(default)]
    pub token: String,

    /// Cache file location (relative paths are resolved against home)
    #[serde(default = "default_cache_file_name")]
    pub cache_file_name: String,

    /// Cache freshness window in minutes
    #[serde(default = "default_cache_duration")]
    pub cache_duration: i64,

    /// User passed to ssh with `-l` (empty = unset)
    #[serde(default)]
    pub default_user: String,

    /// Identity file passed to ssh with `-i` (empty = unset)
    #[serde(default)]
    pub default_key_file_name: String,
}

fn default_cache_file_name() -> String {
    DEFAULT_CACHE_FILE_NAME.to_string()
}

fn default_cache_duration() -> i64 {
    DEFAULT_CACHE_DURATION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: String::new(),
            cache_file_name: default_cache_file_name(),
            cache_duration: default_cache_duration(),
            default_user: String::new(),
            default_key_file_name: String::new(),
        }
    }
}

impl Settings {
    /// Get the default settings file path (~/.dropletconn.conf)
    pub fn default_path() -> Result<PathBuf> {
        Ok(home_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Resolve the settings path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load settings from an optional override path or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::resolve_path(path)?)
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let settings: Settings = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to an optional override path or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<PathBuf> {
        let path = Self::resolve_path(path)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // The file holds an API token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// The trimmed auth token, failing if it is empty
    pub fn auth_token(&self) -> Result<&str> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingToken.into());
        }
        Ok(token)
    }

    /// Absolute path of the inventory cache file
    pub fn cache_path(&self) -> Result<PathBuf> {
        absolute_from_home(&self.cache_file_name)
    }

    /// Default ssh login user, if configured
    pub fn ssh_user(&self) -> Option<&str> {
        non_empty(&self.default_user)
    }

    /// Absolute path of the default ssh identity file, if configured
    pub fn ssh_key_path(&self) -> Result<Option<PathBuf>> {
        non_empty(&self.default_key_file_name)
            .map(absolute_from_home)
            .transpose()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn home_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir().ok_or(ConfigError::NoHome)?)
}

/// Resolve a possibly relative path against the user's home directory
pub fn absolute_from_home(path: &str) -> Result<PathBuf> {
    let given = Path::new(path);
    if given.is_absolute() {
        Ok(given.to_path_buf())
    } else {
        Ok(home_dir()?.join(given))
    }
}

/// Answers collected by the interactive `config` wizard
#[derive(Debug, Clone, Default)]
pub struct WizardAnswers {
    pub token: String,
    pub cache_file_name: String,
    pub cache_duration: String,
    pub default_user: String,
    pub default_key_file_name: String,
}

impl TryFrom<WizardAnswers> for Settings {
    type Error = crate::error::Error;

    /// Apply defaults to empty answers and validate the result
    fn try_from(answers: WizardAnswers) -> Result<Self> {
        let token = answers.token.trim().to_string();
        if token.is_empty() {
            return Err(ConfigError::MissingToken.into());
        }

        let cache_file_name = match non_empty(&answers.cache_file_name) {
            Some(name) => name.to_string(),
            None => default_cache_file_name(),
        };

        let cache_duration = match non_empty(&answers.cache_duration) {
            Some(raw) => raw.parse::<i64>().map_err(|e| {
                ConfigError::Invalid(format!(
                    "Unable to convert input \"{}\" into integer: {}",
                    raw, e
                ))
            })?,
            None => default_cache_duration(),
        };

        Ok(Self {
            token,
            cache_file_name,
            cache_duration,
            default_user: answers.default_user.trim().to_string(),
            default_key_file_name: answers.default_key_file_name.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.token.is_empty());
        assert_eq!(settings.cache_file_name, ".dropletconn.cache");
        assert_eq!(settings.cache_duration, 60);
        assert!(settings.ssh_user().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.conf");

        let settings = Settings {
            token: "abc".to_string(),
            cache_file_name: "/tmp/cache.json".to_string(),
            cache_duration: 15,
            default_user: "root".to_string(),
            default_key_file_name: String::new(),
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.conf");
        Settings::default().save_to(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_loads_legacy_json_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.conf");
        std::fs::write(
            &path,
            r#"{"token":"tok","cache_file_name":".dropletconn.cache","cache_duration":30,"default_user":"","default_key_file_name":".ssh/id_ed25519"}"#,
        )
        .unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.cache_duration, 30);
        assert_eq!(loaded.default_key_file_name, ".ssh/id_ed25519");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.conf");
        std::fs::write(&path, "token: tok\n").unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.cache_duration, DEFAULT_CACHE_DURATION);
        assert_eq!(loaded.cache_file_name, DEFAULT_CACHE_FILE_NAME);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load_from(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_directory_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load_from(dir.path()).unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::Unreadable { .. })
        ));
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().contains("`config` command"));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.conf");
        std::fs::write(&path, "cache_duration: [not, a, number").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_auth_token_trimmed() {
        let settings = Settings {
            token: "  secret \n".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.auth_token().unwrap(), "secret");
    }

    #[test]
    fn test_auth_token_empty_rejected() {
        let settings = Settings {
            token: "   ".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.auth_token(),
            Err(Error::Config(ConfigError::MissingToken))
        ));
    }

    #[test]
    fn test_absolute_paths_kept() {
        let settings = Settings {
            cache_file_name: "/var/tmp/inventory.json".to_string(),
            default_key_file_name: "/keys/id_rsa".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.cache_path().unwrap(),
            PathBuf::from("/var/tmp/inventory.json")
        );
        assert_eq!(
            settings.ssh_key_path().unwrap(),
            Some(PathBuf::from("/keys/id_rsa"))
        );
    }

    #[test]
    fn test_relative_paths_resolved_against_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let settings = Settings {
            default_key_file_name: ".ssh/id_ed25519".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            settings.cache_path().unwrap(),
            home.join(DEFAULT_CACHE_FILE_NAME)
        );
        assert_eq!(
            settings.ssh_key_path().unwrap(),
            Some(home.join(".ssh/id_ed25519"))
        );
    }

    #[test]
    fn test_wizard_answers_defaults() {
        let answers = WizardAnswers {
            token: " tok ".to_string(),
            ..WizardAnswers::default()
        };
        let settings = Settings::try_from(answers).unwrap();
        assert_eq!(settings.token, "tok");
        assert_eq!(settings.cache_file_name, DEFAULT_CACHE_FILE_NAME);
        assert_eq!(settings.cache_duration, DEFAULT_CACHE_DURATION);
        assert!(settings.default_user.is_empty());
    }

    #[test]
    fn test_wizard_rejects_empty_token() {
        let err = Settings::try_from(WizardAnswers::default()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingToken)));
    }

    #[test]
    fn test_wizard_rejects_non_numeric_duration() {
        let answers = WizardAnswers {
            token: "tok".to_string(),
            cache_duration: "soon".to_string(),
            ..WizardAnswers::default()
        };
        let err = Settings::try_from(answers).unwrap_err();
        assert!(err.to_string().contains("\"soon\""));
    }
}
