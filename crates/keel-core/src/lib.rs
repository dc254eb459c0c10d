//! # Keel Core
//!
//! Core library for the keel extension framework: a generic registry that
//! discovers, orders, and drives lifecycle hooks on loosely-coupled
//! extension objects, plus the host pipeline built on top of it.

pub mod config;
pub mod extension_system;
pub mod host;
pub mod utils;

// Re-export key public types/traits for easier use by the binary and
// extension crates.
pub use config::{ConfigError, ConfigFormat, HostConfig};
pub use extension_system::{
    AsExtension, BoxError, Extension, ExtensionRegistry, ExtensionState, ExtensionSystemError,
    Priority, PriorityMask,
};
pub use host::{
    Environment, Host, HostAssembly, HostBuilder, HostError, HostModule, HostSummary, Theme,
};

// Extension registration macros expand to `inventory` items; re-export the
// crate so callers do not need their own dependency on it.
#[doc(hidden)]
pub use inventory;
