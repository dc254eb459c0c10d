//! # Keel Core Extension System
//!
//! This module provides the infrastructure for extending keel through
//! statically registered extensions. It is responsible for the entire
//! lifecycle of an extension set: discovery across registered extension
//! modules, deduplicated instantiation, deterministic priority ordering,
//! broadcast execution, and teardown.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`error`]**: Defines specific error types (e.g.
//!   [`ExtensionSystemError`](error::ExtensionSystemError)) related to
//!   extension operations.
//! - **[`factory`]**: Describes how extension instances are produced:
//!   [`ExtensionFactory`](factory::ExtensionFactory) entries grouped into
//!   named [`ExtensionModule`](factory::ExtensionModule)s, collected per
//!   [`ExtensionPoint`](factory::ExtensionPoint).
//! - **[`macros`]**: The `extension_point!` and `extension_module!` macros
//!   that wire factories into the linker-collected registration set.
//! - **[`priority`]**: The ordering scale ([`Priority`](priority::Priority))
//!   attached to every extension, and the [`PriorityMask`](priority::PriorityMask)
//!   bit-set used to filter by priority class.
//! - **[`registry`]**: Maintains the ordered collection
//!   ([`ExtensionRegistry`](registry::ExtensionRegistry)) of live extension
//!   instances and exposes the broadcast operations.
//! - **[`traits`]**: Contains the [`Extension`](traits::Extension) trait that
//!   all extensions must implement, and the per-instance
//!   [`ExtensionState`](traits::ExtensionState) bookkeeping.
pub mod error;
pub mod factory;
pub mod macros;
pub mod priority;
pub mod registry;
pub mod traits;

pub use error::ExtensionSystemError;
pub use factory::{ExtensionFactory, ExtensionModule, ExtensionPoint};
pub use priority::{Priority, PriorityMask};
pub use registry::ExtensionRegistry;
pub use traits::{AsExtension, BoxError, Extension, ExtensionState};

// Test module declaration
#[cfg(test)]
mod tests;
