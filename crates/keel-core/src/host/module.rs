use crate::extension_system::traits::{BoxError, Extension};
use crate::host::model::{Host, HostBuilder};

/// Extension kind for host lifecycle modules.
///
/// A module participates in host startup through seven hooks, each
/// defaulting to a no-op so implementors override only the phases they
/// care about. `register_services` runs against the [`HostBuilder`]
/// before the host exists; the remaining hooks receive the built
/// [`Host`] in the order laid out in
/// [`STARTUP_SEQUENCE`](crate::host::phases::STARTUP_SEQUENCE).
///
/// Hook errors propagate: a failing hook aborts the remaining modules in
/// that phase broadcast.
pub trait HostModule: Extension {
    /// Contribute named services to the builder
    fn register_services(&mut self, _builder: &mut HostBuilder) -> Result<(), BoxError> {
        Ok(())
    }

    /// Environment-dependent wiring, e.g. error surfaces
    fn configure_environment(&mut self, _host: &mut Host) -> Result<(), BoxError> {
        Ok(())
    }

    /// Transport security wiring
    fn configure_https(&mut self, _host: &mut Host) -> Result<(), BoxError> {
        Ok(())
    }

    /// Static asset wiring
    fn configure_files(&mut self, _host: &mut Host) -> Result<(), BoxError> {
        Ok(())
    }

    /// Request routing wiring
    fn configure_routing(&mut self, _host: &mut Host) -> Result<(), BoxError> {
        Ok(())
    }

    /// Authorization wiring
    fn configure_authorization(&mut self, _host: &mut Host) -> Result<(), BoxError> {
        Ok(())
    }

    /// Claim route paths
    fn map_routes(&mut self, _host: &mut Host) -> Result<(), BoxError> {
        Ok(())
    }
}

crate::extension_point! {
    /// Collection point for host lifecycle modules.
    pub HostModules(HostModuleReg): HostModule
}
