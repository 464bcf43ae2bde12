use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{FtsearchError, Result};

/// User defaults, read from `<config dir>/ftsearch/config.toml` when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comma-joined glob patterns used when `--types` is not given.
    pub default_file_types: String,

    /// How often the consumer re-checks whether the worker is finished.
    pub poll_interval_ms: u64,

    /// Minimum accepted query length, enforced before a search is started.
    pub min_query_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file_types: "*.md".to_string(),
            poll_interval_ms: 100,
            min_query_len: 3,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ftsearch").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| FtsearchError::Config(format!("{}: {e}", path.display())))
    }

    /// A broken config file should not keep the tool from running.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring configuration: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_constants() {
        let config = Config::default();
        assert_eq!(config.default_file_types, "*.md");
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.min_query_len, 3);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("poll_interval_ms = 250").unwrap();
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.min_query_len, 3);
    }
}
