//! Request logging for the keel host.
//!
//! Stays at the default `Normal` priority: the access log middleware slots
//! in after the baseline and status-page wiring without any ordering
//! override.

use std::any::Any;

use keel_core::extension_system::{BoxError, Extension, ExtensionState};
use keel_core::host::{Host, HostBuilder, HostModule};

#[derive(Default)]
pub struct AccessLogModule {
    state: ExtensionState,
}

impl Extension for AccessLogModule {
    fn name(&self) -> &'static str {
        "access-log"
    }

    fn state(&self) -> &ExtensionState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ExtensionState {
        &mut self.state
    }

    fn on_dispose(&mut self) {
        log::debug!("Access log flushed");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl HostModule for AccessLogModule {
    fn register_services(&mut self, builder: &mut HostBuilder) -> Result<(), BoxError> {
        builder.add_service("log-sink");
        Ok(())
    }

    fn configure_routing(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.install_middleware("access-log");
        Ok(())
    }
}

keel_core::extension_module! {
    reg: keel_core::host::HostModuleReg,
    target: keel_core::host::HostModule,
    module: access_log,
    extensions: [
        AccessLogModule,
    ]
}

#[cfg(test)]
mod tests {
    use keel_core::{HostConfig, Priority};

    use super::*;

    #[test]
    fn keeps_the_default_priority() {
        assert_eq!(AccessLogModule::default().priority(), Priority::Normal);
    }

    #[test]
    fn installs_the_access_log_middleware() {
        let mut module = AccessLogModule::default();
        let mut host = HostBuilder::new().build(HostConfig::default());
        module.configure_routing(&mut host).unwrap();
        assert!(host.has_middleware("access-log"));
    }

    #[test]
    fn untouched_phases_stay_no_ops() {
        let mut module = AccessLogModule::default();
        let mut host = HostBuilder::new().build(HostConfig::default());
        module.map_routes(&mut host).unwrap();
        assert!(host.routes().is_empty());
    }
}
