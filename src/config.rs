use crate::api::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

/// Runtime configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog endpoint queried once per run.
    pub endpoint: String,
    /// Where tracing output goes. Logging stays off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the path to the configuration file, e.g.
    /// `~/.config/ghibli-catalog/config.json` on Linux.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "studioghibli", "ghibli-catalog")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the default config file, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads and validates a specific config file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line values on top of the file values.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self.validate()?;
        Ok(self)
    }

    /// The endpoint must be an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Validation {
                message: format!("endpoint must be an http(s) URL, got '{}'", self.endpoint),
            });
        }
        Ok(())
    }
}
