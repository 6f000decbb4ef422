//! Configuration module for dogematch
//!
//! Manages the service address, local database path and search defaults.
//! Configuration is stored in the user's config directory and can be
//! overridden with `DOGEMATCH_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::search::{DEFAULT_PAGE_SIZE, SortOrder};
use crate::session::DEFAULT_SESSION_TTL_SECS;

pub const DEFAULT_API_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

const ENV_PREFIX: &str = "DOGEMATCH";

/// Longest accepted session lifetime, one year
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Keys accepted by `config get` and `config set`
pub const KEYS: &[&str] = &[
    "api_base_url",
    "database_path",
    "page_size",
    "session_ttl_secs",
    "request_timeout_secs",
    "default_sort",
    "quiet",
];

fn default_database_path() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from(".dogematch"), |dir| dir.join("dogematch"))
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DogeConfig {
    /// Base URL of the adoption service
    pub api_base_url: String,

    /// Where the local sled database lives
    pub database_path: PathBuf,

    /// Results per search page
    pub page_size: u32,

    /// How long a login stays valid locally
    pub session_ttl_secs: u64,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Sort applied when `search` is run without `--sort`
    pub default_sort: SortOrder,

    /// Suppress informational output by default
    pub quiet: bool,
}

impl Default for DogeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            database_path: default_database_path(),
            page_size: DEFAULT_PAGE_SIZE,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS.unsigned_abs(),
            request_timeout_secs: 30,
            default_sort: SortOrder::default(),
            quiet: false,
        }
    }
}

impl DogeConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("dogematch").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from `path` with environment overrides
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an override cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true).source(env))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        check_session_ttl(config.session_ttl_secs)?;
        Ok(config)
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Same as [`Self::save`].
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Current value of `key` as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "api_base_url" => self.api_base_url.clone(),
            "database_path" => self.database_path.display().to_string(),
            "page_size" => self.page_size.to_string(),
            "session_ttl_secs" => self.session_ttl_secs.to_string(),
            "request_timeout_secs" => self.request_timeout_secs.to_string(),
            "default_sort" => self.default_sort.to_string(),
            "quiet" => self.quiet.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Parse `value` and assign it to `key`
    ///
    /// Does not save; call [`Self::save`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` for an unknown key or an unparsable value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |e: &dyn std::fmt::Display| {
            ConfigError::Message(format!("Invalid value '{value}' for {key}: {e}"))
        };

        match key {
            "api_base_url" => value.clone_into(&mut self.api_base_url),
            "database_path" => self.database_path = PathBuf::from(value),
            "page_size" => {
                let size: u32 = value.parse().map_err(|e| invalid(&e))?;
                if size == 0 {
                    return Err(invalid(&"must be at least 1"));
                }
                self.page_size = size;
            }
            "session_ttl_secs" => {
                let secs: u64 = value.parse().map_err(|e| invalid(&e))?;
                check_session_ttl(secs)?;
                self.session_ttl_secs = secs;
            }
            "request_timeout_secs" => {
                self.request_timeout_secs = value.parse().map_err(|e| invalid(&e))?;
            }
            "default_sort" => self.default_sort = value.parse().map_err(|e| invalid(&e))?,
            "quiet" => self.quiet = value.parse().map_err(|e| invalid(&e))?,
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown key '{key}' (expected one of: {})",
                    KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Session lifetime as a chrono duration, capped at one year
    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        let secs = self.session_ttl_secs.min(MAX_SESSION_TTL_SECS);
        chrono::Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn check_session_ttl(secs: u64) -> Result<(), ConfigError> {
    if secs > MAX_SESSION_TTL_SECS {
        return Err(ConfigError::Message(format!(
            "session_ttl_secs must be at most {MAX_SESSION_TTL_SECS}, got {secs}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SortDirection, SortField};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = DogeConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.default_sort.to_string(), "breed:asc");
        assert!(!config.quiet);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DogeConfig::load_with_env(&dir.path().join("absent.toml"), Some(Map::new())).unwrap();
        assert_eq!(config, DogeConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = DogeConfig::default();
        config.page_size = 50;
        config.default_sort = SortOrder::new(SortField::Age, SortDirection::Desc);
        config.save_to(&path).unwrap();

        let loaded = DogeConfig::load_with_env(&path, Some(Map::new())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = DogeConfig::load_with_env(&path, Some(Map::new())).unwrap();
        assert!(loaded.quiet);
        assert_eq!(loaded.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 10\n").unwrap();

        let mut env = Map::new();
        env.insert("DOGEMATCH_PAGE_SIZE".to_string(), "40".to_string());
        env.insert("DOGEMATCH_API_BASE_URL".to_string(), "http://localhost:8080".to_string());

        let loaded = DogeConfig::load_with_env(&path, Some(env)).unwrap();
        assert_eq!(loaded.page_size, 40);
        assert_eq!(loaded.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn test_set_and_get() {
        let mut config = DogeConfig::default();

        config.set("page_size", "10").unwrap();
        config.set("default_sort", "name:desc").unwrap();
        config.set("quiet", "true").unwrap();

        assert_eq!(config.get("page_size").as_deref(), Some("10"));
        assert_eq!(config.get("default_sort").as_deref(), Some("name:desc"));
        assert_eq!(config.get("quiet").as_deref(), Some("true"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = DogeConfig::default();

        assert!(config.set("page_size", "0").is_err());
        assert!(config.set("page_size", "many").is_err());
        assert!(config.set("default_sort", "color:asc").is_err());
        assert!(config.set("no_such_key", "1").is_err());
        assert_eq!(config, DogeConfig::default());
    }

    #[test]
    fn test_set_rejects_huge_session_ttl() {
        let mut config = DogeConfig::default();

        assert!(config.set("session_ttl_secs", "99999999999999").is_err());
        assert_eq!(config.session_ttl_secs, 3600);

        config.set("session_ttl_secs", &MAX_SESSION_TTL_SECS.to_string()).unwrap();
        assert_eq!(config.session_ttl(), chrono::Duration::days(365));
    }

    #[test]
    fn test_load_rejects_huge_session_ttl() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "session_ttl_secs = 99999999999999\n").unwrap();

        assert!(DogeConfig::load_with_env(&path, Some(Map::new())).is_err());
    }

    #[test]
    fn test_session_ttl_is_capped() {
        let config = DogeConfig { session_ttl_secs: u64::MAX, ..DogeConfig::default() };
        assert_eq!(config.session_ttl(), chrono::Duration::seconds(365 * 24 * 60 * 60));
    }

    #[test]
    fn test_get_unknown_key() {
        assert!(DogeConfig::default().get("nope").is_none());
    }

    #[test]
    fn test_durations() {
        let config = DogeConfig::default();
        assert_eq!(config.session_ttl(), chrono::Duration::seconds(3600));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
