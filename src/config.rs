use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// File name probed in the working directory when no --config is given
pub const DEFAULT_CONFIG_FILE: &str = "log-sieve.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    /// Free-form label for the loaded profile.
    pub profile_name: String,
    /// Default filter expressions; CLI filters extend this list and the
    /// combined list is OR-combined as usual.
    pub filters: Vec<String>,
    pub display: DisplayRules,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            profile_name: "default".to_string(),
            filters: Vec::new(),
            display: DisplayRules::default(),
        }
    }
}

/// Which record fields the text renderer treats as level, code and message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRules {
    pub level_field: String,
    pub code_field: String,
    pub message_field: String,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self {
            level_field: "level".to_string(),
            code_field: "code".to_string(),
            message_field: "message".to_string(),
        }
    }
}

/// Load the profile from an explicit path, or from `log-sieve.toml` in the
/// working directory if present, or fall back to built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<SieveConfig, ConfigError> {
    match path {
        Some(path) => load_config_from_path(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                load_config_from_path(default)
            } else {
                Ok(SieveConfig::default())
            }
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<SieveConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
