// Durable single-record configuration, stored as TOML at ~/.my-zt.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but its contents are not a valid configuration.
    /// Never silently replaced with defaults.
    #[error("failed to parse config file: {0}")]
    Format(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The one record my-zt persists: an API token and a preferred network.
/// Both fields are independently optional; the app runs (and prompts)
/// without either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zerotier_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_network_id: Option<String>,
}

impl Config {
    /// The token, treating blank strings the same as absent.
    pub fn token(&self) -> Option<&str> {
        self.zerotier_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Owns the on-disk representation of [`Config`]. Each `load` re-reads the
/// file, so edits by another call site are picked up on the next read.
/// No locking: last writer wins.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by the default path `~/.my-zt.toml`.
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at_path(home.join(".my-zt.toml")))
    }

    /// Store backed by an explicit path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with serialized defaults if it does not exist yet.
    /// No error (and no write) when it already exists.
    pub fn ensure_exists(&self) -> Result<(), ConfigError> {
        if !self.path.exists() {
            self.write_out(&Config::default())?;
        }
        Ok(())
    }

    /// Read the full record from disk, creating it first if absent.
    pub fn load(&self) -> Result<Config, ConfigError> {
        self.ensure_exists()?;
        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Overwrite the file with the full record. No partial updates.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        self.write_out(config)
    }

    // Temp file + rename so a crash mid-write can't truncate the config.
    fn write_out(&self, config: &Config) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(config)?;
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, &contents).map_err(|source| ConfigError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}
