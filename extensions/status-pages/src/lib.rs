//! Status pages for the keel host.
//!
//! A `Priority::High` module that claims the status routes ahead of
//! lower-priority modules and installs the middleware that renders them.
//! In production the generic error page also claims `/error`; in
//! development the baseline developer exception page is left in charge.

use std::any::Any;

use keel_core::extension_system::{BoxError, Extension, ExtensionState, Priority};
use keel_core::host::{Host, HostBuilder, HostModule};

#[derive(Default)]
pub struct StatusPagesModule {
    state: ExtensionState,
}

impl Extension for StatusPagesModule {
    fn name(&self) -> &'static str {
        "status-pages"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn state(&self) -> &ExtensionState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ExtensionState {
        &mut self.state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl HostModule for StatusPagesModule {
    fn register_services(&mut self, builder: &mut HostBuilder) -> Result<(), BoxError> {
        builder.add_service("status-pages");
        Ok(())
    }

    fn configure_environment(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.install_middleware("status-pages");
        Ok(())
    }

    fn map_routes(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.map_route("/status/404", "not-found-page");
        host.map_route("/status/500", "server-error-page");
        if !host.environment().is_development() {
            host.map_route("/error", "generic-error-page");
        }
        log::debug!("Status routes mapped");
        Ok(())
    }
}

keel_core::extension_module! {
    reg: keel_core::host::HostModuleReg,
    target: keel_core::host::HostModule,
    module: status_pages,
    extensions: [
        StatusPagesModule,
    ]
}
