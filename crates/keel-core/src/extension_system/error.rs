//! # Keel Core Extension System Errors
//!
//! Defines error types specific to the extension system.
//!
//! [`ExtensionSystemError`] covers the faults the registry can surface:
//! construction failures during discovery, duplicate direct registration,
//! and typed lookups that miss. Discovery-time construction failures are
//! reported through the registry's failure hook and never abort a scan;
//! everything else is returned to the caller.

use crate::extension_system::traits::BoxError;

#[derive(Debug, thiserror::Error)]
pub enum ExtensionSystemError {
    #[error("failed to construct extension type '{type_name}': {source}")]
    ConstructionFailed {
        type_name: String,
        #[source]
        source: BoxError,
    },

    #[error("extension type '{type_name}' is already registered")]
    DuplicateExtension { type_name: String },

    #[error("unknown priority '{value}'")]
    UnknownPriority { value: String },
}
