use std::path::PathBuf;

use crate::config::ConfigFormat;
use crate::extension_system::traits::BoxError;

/// Errors raised by the configuration layer.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {format} config: {source}")]
    Parse {
        format: ConfigFormat,
        #[source]
        source: BoxError,
    },

    #[error("failed to serialize {format} config: {source}")]
    Serialize {
        format: ConfigFormat,
        #[source]
        source: BoxError,
    },

    #[error("unsupported config format for '{path}'")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },
}
