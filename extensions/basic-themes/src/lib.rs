//! Stock themes for the keel host.
//!
//! Two themes at different priorities. Style keys are first-writer-wins
//! and themes broadcast in ascending priority order, so where both claim a
//! key the midnight theme's value sticks and daylight only fills what is
//! left.

use std::any::Any;

use keel_core::extension_system::{BoxError, Extension, ExtensionState, Priority};
use keel_core::host::{Host, Theme};

/// Dark palette, applied ahead of the default-priority theme.
#[derive(Default)]
pub struct MidnightTheme {
    state: ExtensionState,
}

impl Extension for MidnightTheme {
    fn name(&self) -> &'static str {
        "midnight"
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

impl Theme for MidnightTheme {
    fn apply(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.set_style("background", "#11131a");
        host.set_style("foreground", "#d8dee9");
        Ok(())
    }
}

/// Light palette at the default priority.
#[derive(Default)]
pub struct DaylightTheme {
    state: ExtensionState,
}

impl Extension for DaylightTheme {
    fn name(&self) -> &'static str {
        "daylight"
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

impl Theme for DaylightTheme {
    fn apply(&mut self, host: &mut Host) -> Result<(), BoxError> {
        host.set_style("background", "#fafafa");
        host.set_style("foreground", "#1c1c1c");
        host.set_style("accent", "#2a6fdb");
        Ok(())
    }
}

keel_core::extension_module! {
    reg: keel_core::host::ThemeReg,
    target: keel_core::host::Theme,
    module: basic_themes,
    extensions: [
        MidnightTheme,
        DaylightTheme,
    ]
}

#[cfg(test)]
mod tests {
    use keel_core::HostConfig;
    use keel_core::host::HostBuilder;

    use super::*;

    #[test]
    fn midnight_outranks_daylight() {
        assert!(MidnightTheme::default().priority() < DaylightTheme::default().priority());
    }

    #[test]
    fn midnight_keeps_contested_keys_daylight_fills_the_rest() {
        let mut host = HostBuilder::new().build(HostConfig::default());
        MidnightTheme::default().apply(&mut host).unwrap();
        DaylightTheme::default().apply(&mut host).unwrap();

        assert_eq!(host.style("background"), Some("#11131a"));
        assert_eq!(host.style("foreground"), Some("#d8dee9"));
        assert_eq!(host.style("accent"), Some("#2a6fdb"));
    }
}
