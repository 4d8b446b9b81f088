//! Configuration file structures for the emulated host.
//!
//! A TOML fixture file describes the host a plugin is exercised against:
//! - [`ConfigFile`]: Top-level configuration file structure
//! - `[host]`: resource limits, see [`HostConfig`]
//! - `[kv]`: seed entries for the key/value store
//! - `pantry`: fruits the `eatAFruit` host function accepts

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::HostConfig;

/// Top-level configuration file structure.
///
/// # Example
///
/// ```toml
/// pantry = ["apple", "banana"]
///
/// [host]
/// max_buffer_bytes = 65536
/// log_level = "info"
///
/// [kv]
/// greeting = "hello"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigFile {
    /// Fruits the host will let the guest eat, each at most once.
    #[serde(default = "defaults::pantry")]
    pub pantry: Vec<String>,

    /// Host resource limits.
    #[serde(default)]
    pub host: HostConfig,

    /// Initial key/value store contents.
    ///
    /// Values are stored as their UTF-8 bytes.
    #[serde(default)]
    pub kv: BTreeMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            pantry: defaults::pantry(),
            host: HostConfig::default(),
            kv: BTreeMap::new(),
        }
    }
}

impl ConfigFile {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigFileError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed as TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(content).map_err(|e| ConfigFileError::Parse {
            message: e.to_string(),
        })
    }
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config file: {message}")]
    Parse { message: String },
}

/// Default value functions for serde.
mod defaults {
    pub fn pantry() -> Vec<String> {
        ["apple", "orange", "banana", "strawberry"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogLevel;

    #[test]
    fn test_default_config_file() {
        let config = ConfigFile::default();

        assert_eq!(config.pantry, ["apple", "orange", "banana", "strawberry"]);
        assert_eq!(config.host.max_live_handles, 1024);
        assert!(config.kv.is_empty());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = ConfigFile::from_toml("").unwrap();

        assert_eq!(config.pantry.len(), 4);
        assert_eq!(config.host.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            pantry = ["banana"]

            [host]
            max_buffer_bytes = 64
            max_live_handles = 4
            log_level = "warn"

            [kv]
            greeting = "hello"
            empty = ""
        "#;

        let config = ConfigFile::from_toml(toml).unwrap();

        assert_eq!(config.pantry, ["banana"]);
        assert_eq!(config.host.max_buffer_bytes, 64);
        assert_eq!(config.host.max_live_handles, 4);
        assert_eq!(config.host.log_level, LogLevel::Warn);
        assert_eq!(config.kv.len(), 2);
        assert_eq!(config.kv["greeting"], "hello");
        assert_eq!(config.kv["empty"], "");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let invalid = "this is not valid toml [";
        let result = ConfigFile::from_toml(invalid);
        assert!(matches!(result, Err(ConfigFileError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigFile::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigFileError::Io { .. })));
    }
}
