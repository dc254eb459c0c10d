//! # Keel Configuration
//!
//! File-backed host configuration. [`HostConfig`] is plain serde data that
//! round-trips through TOML (default, behind the `toml-config` feature) or
//! JSON, with the format chosen by file extension.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::model::Environment;

pub mod error;

pub use error::ConfigError;


/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Reserved operational limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Cap on extensions accepted per discovery scan; unset means no cap.
    /// Parsed and carried but not yet enforced.
    pub max_extensions: Option<usize>,
}

/// Host configuration.
///
/// Every field has a default, so a partial file (or no file at all) still
/// yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Application name shown in the host summary
    pub name: String,
    /// Runtime environment the host is configured for
    pub environment: Environment,
    /// Listen address, carried as plain data
    pub listen: String,
    /// Reserved operational limits
    pub limits: Limits,
    /// Style defaults, applied to any key no theme claims
    pub styles: HashMap<String, String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: "keel".to_string(),
            environment: Environment::Development,
            listen: "127.0.0.1:8080".to_string(),
            limits: Limits::default(),
            styles: HashMap::new(),
        }
    }
}

impl HostConfig {
    /// Load a configuration from a file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::deserialize_from(&data, format)
    }

    /// Save the configuration, choosing the format by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        let data = self.serialize_to(format)?;
        fs::write(path, data).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize to a string in the given format
    pub fn serialize_to(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                    format,
                    source: Box::new(e),
                })
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                    format,
                    source: Box::new(e),
                })
            }
        }
    }

    /// Deserialize from a string in the given format
    pub fn deserialize_from(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(|e| ConfigError::Parse {
                format,
                source: Box::new(e),
            }),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(|e| ConfigError::Parse {
                format,
                source: Box::new(e),
            }),
        }
    }
}
