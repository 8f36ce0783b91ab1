//! Configuration types for the Logistics ETA API.
//!
//! Configuration is loaded from a YAML file (`eta.yaml` by default, or the path
//! in `ETA_CONFIG`). Secrets are never stored inline: the token key is read from
//! the environment variable or file named in the `token` section.
//!
//! ```yaml
//! server:
//!   bind: "0.0.0.0:8080"
//! token:
//!   symmetric_key_env: TOKEN_SYMMETRIC_KEY
//!   symmetric_key_file: secrets/token.key
//!   access_token_duration: 15m
//! ```

pub mod token;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use token::{TokenConfig, parse_duration};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ETA_CONFIG";

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "eta.yaml";

/// Complete configuration loaded from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EtaConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Session token settings.
    #[serde(default)]
    pub token: TokenConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080"
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EtaConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration from `ETA_CONFIG` or `eta.yaml`.
    ///
    /// An explicitly named file must exist. A missing default file yields the
    /// default configuration.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(PathBuf::from(path)),
            Err(_) => Self::load_or_default(DEFAULT_CONFIG_PATH),
        }
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
