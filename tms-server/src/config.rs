//! Configuration file loading
//!
//! `~/.tms/config.toml` (or an explicit path) supplies defaults for the server
//! and database. Every value is optional; command-line flags and environment
//! variables override what is set here. `${VAR}` references in the database
//! URL are expanded from the environment.

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?} (invalid TOML): {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TmsConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    /// Create missing tables on startup
    pub migrate: Option<bool>,
}

impl TmsConfig {
    /// Default config file path: ~/.tms/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tms/config.toml")
    }

    /// Load the default config file, or defaults when it does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load an explicit config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.expand_variables();

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Expand ${var} references from the environment
    fn expand_variables(&mut self) {
        let vars: HashMap<String, String> = env::vars().collect();
        if let Some(ref url) = self.database.url {
            self.database.url = Some(Self::expand_string(url, &vars));
        }
    }

    /// Expand ${var} references in a string. Unknown variables are left as is.
    fn expand_string(s: &str, vars: &HashMap<String, String>) -> String {
        let mut result = s.to_string();

        for (key, value) in vars {
            let pattern = format!("${{{}}}", key);
            result = result.replace(&pattern, value);
        }

        result
    }
}
