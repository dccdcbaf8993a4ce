//! eventdesk configuration.
//!
//! Values are layered: built-in defaults, then `~/.config/eventdesk/config.toml`
//! (optional), then `EVENTDESK_*` environment variables. Configuration is read
//! once at startup and not reloaded.

use std::fmt;
use std::path::{Path, PathBuf};

use ::config::{Config as Layers, Environment, File};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, ConfigResult};

static DEFAULT_API_BASE: &str = "http://localhost:8000/api";
const ENV_PREFIX: &str = "EVENTDESK";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn is_default_api_base(s: &String) -> bool {
    s == DEFAULT_API_BASE
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn is_default_log_level(level: &LogLevel) -> bool {
    *level == LogLevel::default()
}

/// Configuration surface consumed by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the remote events API
    #[serde(default = "default_api_base", skip_serializing_if = "is_default_api_base")]
    pub api_base: String,

    /// Serve events from the in-memory gateway instead of the API
    #[serde(default, skip_serializing_if = "is_false")]
    pub use_test_data: bool,

    #[serde(default, skip_serializing_if = "is_default_log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            use_test_data: false,
            log_level: LogLevel::default(),
        }
    }
}

/// Logging threshold. Unknown names fall back to `info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl From<String> for LogLevel {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" | "warning" => LogLevel::Warn,
            "debug" => LogLevel::Debug,
            _ => LogLevel::Info,
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.as_str().to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Config {
    /// ~/.config/eventdesk/config.toml
    pub fn config_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Invalid("Could not determine config directory".into()))?
            .join("eventdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path and the environment.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (optional file) and the environment.
    /// `api_base` is not validated here; see [`Config::api_base`].
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        Layers::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// The API base as a URL. Only http and https are accepted.
    pub fn api_base(&self) -> ConfigResult<Url> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| ConfigError::InvalidApiBase(self.api_base.clone(), e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidApiBase(
                self.api_base.clone(),
                format!("unsupported scheme '{}'", other),
            )),
        }
    }

    /// Save the config as TOML at `path`.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ConfigResult<()> {
        let contents = format!(
            "\
# eventdesk configuration

# Base URL of the events API:
# api_base = \"{}\"

# Serve events from local test data instead of the API:
# use_test_data = false

# Log level (error, warn, info, debug):
# log_level = \"info\"
",
            DEFAULT_API_BASE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Invalid(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ConfigError::Invalid(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
