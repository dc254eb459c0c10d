use std::any::Any;
use std::collections::HashSet;

use crate::extension_system::priority::Priority;

/// Boxed error type carried by extension constructors and lifecycle hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Per-instance bookkeeping every extension carries.
///
/// Tracks which named hooks have already run (so a re-driven phase can be
/// skipped) and whether the extension has been disposed. The set of
/// executed names only grows; the disposed flag is set once and never
/// cleared.
#[derive(Debug, Default)]
pub struct ExtensionState {
    /// Names of hooks that have already executed on this instance
    executed: HashSet<String>,
    /// Set once the disposal hook has run
    disposed: bool,
}

impl ExtensionState {
    /// Create a fresh state with nothing executed and not disposed
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `mark_executed` was previously called with this exact name
    pub fn has_executed(&self, name: &str) -> bool {
        self.executed.contains(name)
    }

    /// Record that the named hook has run
    pub fn mark_executed(&mut self, name: &str) {
        self.executed.insert(name.to_string());
    }

    /// Number of distinct hook names recorded so far
    pub fn executed_count(&self) -> usize {
        self.executed.len()
    }

    /// Whether the extension has been disposed
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Set the disposed flag, returning `true` only on the first call.
    pub(crate) fn mark_disposed(&mut self) -> bool {
        if self.disposed {
            false
        } else {
            self.disposed = true;
            true
        }
    }
}

/// Core trait that all extensions must implement.
///
/// An extension is a discoverable, priority-ordered unit of behavior.
/// Implementors supply a name, their [`ExtensionState`], and optionally a
/// priority and a disposal hook; the execution-ledger and disposal methods
/// are provided on top of the state accessors.
pub trait Extension: Any + Send {
    /// The name of this extension
    fn name(&self) -> &'static str;

    /// Ordering value for broadcasts; stable for the object's lifetime
    fn priority(&self) -> Priority {
        Priority::Normal
    }

    /// Access the per-instance bookkeeping
    fn state(&self) -> &ExtensionState;

    /// Mutable access to the per-instance bookkeeping
    fn state_mut(&mut self) -> &mut ExtensionState;

    /// Release hook, run at most once by [`dispose`](Extension::dispose).
    ///
    /// Override this to free held resources; do not call it directly.
    fn on_dispose(&mut self) {}

    /// Cast to Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Cast to mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Whether the named hook has already run on this instance
    fn has_executed(&self, name: &str) -> bool {
        self.state().has_executed(name)
    }

    /// Record that the named hook has run on this instance
    fn mark_executed(&mut self, name: &str) {
        self.state_mut().mark_executed(name);
    }

    /// Whether this extension has been disposed
    fn is_disposed(&self) -> bool {
        self.state().is_disposed()
    }

    /// Dispose this extension.
    ///
    /// The first call runs [`on_dispose`](Extension::on_dispose); every
    /// later call is a no-op. After disposal no further lifecycle hook may
    /// be driven through this instance.
    fn dispose(&mut self) {
        if self.state_mut().mark_disposed() {
            self.on_dispose();
        }
    }
}

/// Bridge from an extension-kind trait object to the base [`Extension`]
/// contract.
///
/// The registry is generic over the trait-object type of the kind it
/// stores (`dyn HostModule`, `dyn Theme`). Such a type exposes its
/// supertrait methods at call sites but does not itself satisfy an
/// `Extension` bound, so the registry reaches the base contract through
/// this trait instead. [`extension_point!`](crate::extension_point)
/// generates the implementation for each point's target via trait
/// upcasting.
pub trait AsExtension {
    /// View this value through the base contract
    fn as_extension(&self) -> &dyn Extension;

    /// Mutable view of this value through the base contract
    fn as_extension_mut(&mut self) -> &mut dyn Extension;
}

impl AsExtension for dyn Extension {
    fn as_extension(&self) -> &dyn Extension {
        self
    }

    fn as_extension_mut(&mut self) -> &mut dyn Extension {
        self
    }
}
