//! The baseline host module.
//!
//! Runs at `Priority::Root`, before every other extension, and wires the
//! services, middleware, and default route a host needs to be functional
//! with no other extensions present. Later modules layer their own
//! contributions on top at their own priorities.

use std::any::Any;

use keel_core::extension_system::{BoxError, Extension, ExtensionState, Priority};
use keel_core::host::{Host, HostBuilder, HostModule};

#[derive(Default)]
pub struct BaselineModule {
    state: ExtensionState,
}

impl Extension for BaselineModule {
    fn name(&self) -> &'static str {
        "host-baseline"
    }

    fn priority(&self) -> Priority {
        Priority::Root
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

impl HostModule for BaselineModule {
    fn register_services(&mut self, builder: &mut HostBuilder) -> Result<(), BoxError> {
        builder
            .add_service("routing")
            .add_service("static-files")
            .add_service("authorization");
        Ok(())
    }

    fn configure_environment(&mut self, host: &mut Host) -> Result<(), BoxError> {
        if host.environment().is_development() {
            host.install_middleware("developer-exception-page");
        } else {
            host.install_middleware("exception-handler");
            host.install_middleware("hsts");
        }
        log::debug!("Baseline environment wiring for {}", host.environment());
        Ok(())
    }

    fn configure_https(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.install_middleware("https-redirection");
        Ok(())
    }

    fn configure_files(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.install_middleware("static-files");
        Ok(())
    }

    fn configure_routing(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.install_middleware("routing");
        Ok(())
    }

    fn configure_authorization(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.install_middleware("authorization");
        Ok(())
    }

    fn map_routes(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.map_route("/", "default");
        Ok(())
    }
}

keel_core::extension_module! {
    reg: keel_core::host::HostModuleReg,
    target: keel_core::host::HostModule,
    module: host_baseline,
    extensions: [
        BaselineModule,
    ]
}
