//! Interpreter configuration.
//!
//! Loaded from an optional JSON file; command-line flags override it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the interactive front end
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplConfig {
    /// Prompt printed before each line
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Where line-editor history is kept, if anywhere
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Default `tracing` filter directive
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_prompt() -> String {
    "db > ".to_string()
}

fn default_history_size() -> usize {
    1000
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_file: None,
            history_size: default_history_size(),
            log_filter: default_log_filter(),
        }
    }
}

impl ReplConfig {
    /// Load a configuration file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
