use crate::extension_system::traits::{BoxError, Extension};
use crate::host::model::Host;

/// Extension kind for themes.
///
/// A theme contributes style entries to the host. Style keys are
/// first-writer-wins and themes are broadcast in ascending priority
/// order, so a higher-priority theme's values take precedence over later
/// writers of the same keys.
pub trait Theme: Extension {
    /// Contribute style entries to the host
    fn apply(&mut self, host: &mut Host) -> Result<(), BoxError>;
}

crate::extension_point! {
    /// Collection point for themes.
    pub Themes(ThemeReg): Theme
}
