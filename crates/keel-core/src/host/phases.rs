//! The startup driver.
//!
//! A [`HostAssembly`] owns one registry of host modules and one of themes
//! and turns a [`HostConfig`] into a configured [`Host`] by broadcasting
//! the lifecycle phases in a fixed order: `register_services` over the
//! builder, then the six app phases over the built host, then `apply` over
//! the themes. Each broadcast visits extensions in ascending priority
//! order.
//!
//! Every dispatch is guarded by the extension's execution ledger: a hook
//! that has already run for a phase name is skipped, so re-driving a phase
//! over the same registry is a no-op. Disposed extensions are skipped
//! entirely.

use crate::config::HostConfig;
use crate::extension_system::registry::ExtensionRegistry;
use crate::extension_system::traits::{AsExtension, BoxError};
use crate::host::error::HostError;
use crate::host::model::{Host, HostBuilder};
use crate::host::module::{HostModule, HostModules};
use crate::host::theme::{Theme, Themes};

/// Service-registration phase, run against the builder before the host
/// exists.
pub const REGISTER_SERVICES: &str = "register_services";
/// Environment-dependent wiring phase.
pub const CONFIGURE_ENVIRONMENT: &str = "configure_environment";
/// Transport security phase.
pub const CONFIGURE_HTTPS: &str = "configure_https";
/// Static asset phase.
pub const CONFIGURE_FILES: &str = "configure_files";
/// Request routing phase.
pub const CONFIGURE_ROUTING: &str = "configure_routing";
/// Authorization phase.
pub const CONFIGURE_AUTHORIZATION: &str = "configure_authorization";
/// Route claiming phase.
pub const MAP_ROUTES: &str = "map_routes";
/// Theme application phase, run last.
pub const APPLY_THEME: &str = "apply";

/// Ordered list of phase names.
pub type PhaseSequence = &'static [&'static str];

/// The module phases that run over the built host, in execution order.
///
/// [`REGISTER_SERVICES`] precedes these on the builder; [`APPLY_THEME`]
/// follows them over the theme registry.
pub const STARTUP_SEQUENCE: PhaseSequence = &[
    CONFIGURE_ENVIRONMENT,
    CONFIGURE_HTTPS,
    CONFIGURE_FILES,
    CONFIGURE_ROUTING,
    CONFIGURE_AUTHORIZATION,
    MAP_ROUTES,
];

/// The discovered extension set and the machinery to start a host from it.
#[derive(Default)]
pub struct HostAssembly {
    modules: ExtensionRegistry<dyn HostModule>,
    themes: ExtensionRegistry<dyn Theme>,
}

impl HostAssembly {
    /// An assembly with empty registries, for hosts built by hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover every statically registered host module and theme.
    pub fn discover() -> Self {
        let mut assembly = Self::new();
        assembly.modules.discover::<HostModules>();
        assembly.themes.discover::<Themes>();
        assembly
    }

    /// The host module registry
    pub fn modules(&self) -> &ExtensionRegistry<dyn HostModule> {
        &self.modules
    }

    /// Mutable access to the host module registry
    pub fn modules_mut(&mut self) -> &mut ExtensionRegistry<dyn HostModule> {
        &mut self.modules
    }

    /// The theme registry
    pub fn themes(&self) -> &ExtensionRegistry<dyn Theme> {
        &self.themes
    }

    /// Mutable access to the theme registry
    pub fn themes_mut(&mut self) -> &mut ExtensionRegistry<dyn Theme> {
        &mut self.themes
    }

    /// Drive every lifecycle phase and produce the configured host.
    ///
    /// Phases run phase-major: each phase is one broadcast over the whole
    /// registry before the next phase begins. The first hook error aborts
    /// the current broadcast and propagates; earlier contributions are not
    /// rolled back.
    pub fn start(&mut self, config: HostConfig) -> Result<Host, HostError> {
        let mut builder = HostBuilder::new();
        log::debug!(
            "Running phase '{}' over {} module(s)",
            REGISTER_SERVICES,
            self.modules.len()
        );
        self.modules.try_execute(|module| {
            drive(module, REGISTER_SERVICES, |module| {
                module.register_services(&mut builder)
            })
        })?;

        let mut host = builder.build(config);
        for &phase in STARTUP_SEQUENCE {
            log::debug!(
                "Running phase '{}' over {} module(s)",
                phase,
                self.modules.len()
            );
            self.modules.try_execute(|module| {
                drive(module, phase, |module| dispatch(module, phase, &mut host))
            })?;
        }

        log::debug!(
            "Running phase '{}' over {} theme(s)",
            APPLY_THEME,
            self.themes.len()
        );
        self.themes
            .try_execute(|theme| drive(theme, APPLY_THEME, |theme| theme.apply(&mut host)))?;

        host.apply_style_defaults();
        Ok(host)
    }

    /// Dispose every module and theme and clear both registries.
    pub fn free(&mut self) -> &mut Self {
        self.modules.free();
        self.themes.free();
        self
    }
}

/// Invoke one module hook by phase name.
fn dispatch(module: &mut dyn HostModule, phase: &str, host: &mut Host) -> Result<(), BoxError> {
    match phase {
        CONFIGURE_ENVIRONMENT => module.configure_environment(host),
        CONFIGURE_HTTPS => module.configure_https(host),
        CONFIGURE_FILES => module.configure_files(host),
        CONFIGURE_ROUTING => module.configure_routing(host),
        CONFIGURE_AUTHORIZATION => module.configure_authorization(host),
        MAP_ROUTES => module.map_routes(host),
        other => Err(format!("unknown phase '{other}'").into()),
    }
}

/// Run one ledger-guarded hook dispatch.
///
/// Skips the extension when it is disposed or has already executed this
/// phase; otherwise runs the hook and records the phase name on success.
fn drive<E, F>(ext: &mut E, phase: &'static str, hook: F) -> Result<(), HostError>
where
    E: AsExtension + ?Sized,
    F: FnOnce(&mut E) -> Result<(), BoxError>,
{
    let name = {
        let base = ext.as_extension();
        if base.is_disposed() {
            log::trace!("Skipping disposed extension '{}'", base.name());
            return Ok(());
        }
        if base.has_executed(phase) {
            log::trace!("Extension '{}' already ran phase '{}'", base.name(), phase);
            return Ok(());
        }
        base.name()
    };
    log::trace!("Dispatching phase '{phase}' to '{name}'");
    hook(ext).map_err(|source| HostError::PhaseFailed {
        phase,
        extension: name,
        source,
    })?;
    ext.as_extension_mut().mark_executed(phase);
    Ok(())
}
