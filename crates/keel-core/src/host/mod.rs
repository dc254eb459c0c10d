//! # Keel Host Pipeline
//!
//! The consumer the extension system was built for: an inert host model
//! assembled by broadcasting a fixed sequence of lifecycle phases over the
//! discovered extensions. Nothing in here speaks a wire protocol; services,
//! middleware, and routes are plain labels so the registry semantics can be
//! driven end to end without a hosting framework.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`error`]**: Defines [`HostError`](error::HostError), the failure
//!   type phase execution surfaces.
//! - **[`model`]**: The host data model: [`Environment`](model::Environment),
//!   [`HostBuilder`](model::HostBuilder), and the configured
//!   [`Host`](model::Host).
//! - **[`module`]**: The [`HostModule`](module::HostModule) extension kind
//!   with the seven lifecycle hooks, and its extension point.
//! - **[`phases`]**: The startup driver ([`HostAssembly`](phases::HostAssembly))
//!   that broadcasts each phase in order, guarded by the execution ledger.
//! - **[`theme`]**: The [`Theme`](theme::Theme) extension kind contributing
//!   style entries, and its extension point.
pub mod error;
pub mod model;
pub mod module;
pub mod phases;
pub mod theme;

pub use error::HostError;
pub use model::{Environment, Host, HostBuilder, HostSummary, Route};
pub use module::{HostModule, HostModuleReg, HostModules};
pub use phases::{HostAssembly, PhaseSequence, STARTUP_SEQUENCE};
pub use theme::{Theme, ThemeReg, Themes};
