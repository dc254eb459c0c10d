//! # Keel Host Errors
//!
//! Defines [`HostError`], the failure type the phase driver surfaces.
//!
//! A hook failure during a phase broadcast aborts the remaining extensions
//! in that broadcast and propagates as [`HostError::PhaseFailed`]; config
//! errors raised while assembling a host are wrapped from the config layer.

use crate::config::ConfigError;
use crate::extension_system::traits::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("phase '{phase}' failed in extension '{extension}': {source}")]
    PhaseFailed {
        phase: &'static str,
        extension: &'static str,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
