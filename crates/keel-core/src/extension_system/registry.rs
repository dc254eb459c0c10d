use std::any::TypeId;

use crate::extension_system::error::ExtensionSystemError;
use crate::extension_system::factory::{ExtensionModule, ExtensionPoint};
use crate::extension_system::traits::{AsExtension, Extension};

/// One registered instance with the metadata the registry keys on.
struct RegistryEntry<E: ?Sized> {
    /// Concrete type identity, the dedup key
    type_id: TypeId,
    /// Registration sequence number, the tie-break key for equal priorities
    seq: u64,
    /// The instance itself; the registry is the sole owner
    instance: Box<E>,
}

/// Registry for managing extensions of one kind.
///
/// Owns at most one instance per concrete type, kept sorted ascending by
/// `(priority, registration sequence)`. Chaining operations return
/// `&mut Self`; the two read-only queries do not.
///
/// The registry is single-threaded: all operations are blocking,
/// run-to-completion calls on the calling thread, with no internal
/// locking. Callers that drive one registry from several threads must
/// serialize access externally.
pub struct ExtensionRegistry<E: AsExtension + ?Sized + 'static> {
    /// Registered extensions in current sort order
    entries: Vec<RegistryEntry<E>>,
    /// Next registration sequence number
    next_seq: u64,
    /// Hook invoked when a factory fails during discovery
    discover_fail: Box<dyn FnMut(&str, &ExtensionSystemError) + Send>,
}

impl<E: AsExtension + ?Sized + 'static> ExtensionRegistry<E> {
    /// Create an empty registry with the default failure hook, which logs
    /// the fault and moves on.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
            discover_fail: Box::new(|_type_name, err| log::warn!("{}", err)),
        }
    }

    /// Scan every module registered for the extension point `P`.
    ///
    /// Modules are visited in name order so a full scan does not depend on
    /// link order. Idempotent: types already represented in the registry
    /// are skipped, so a second scan adds nothing. Re-sorts before
    /// returning.
    pub fn discover<P>(&mut self) -> &mut Self
    where
        P: ExtensionPoint<Target = E>,
    {
        let mut modules = P::modules();
        modules.sort_by_key(|module| module.name);
        for module in modules {
            self.scan_module(module);
        }
        self.sort()
    }

    /// Scan a single extension module. This is the primitive that
    /// [`discover`](Self::discover) fans out to, with the same dedup,
    /// failure-isolation, and re-sort behavior.
    pub fn discover_module(&mut self, module: &ExtensionModule<E>) -> &mut Self {
        self.scan_module(module);
        self.sort()
    }

    fn scan_module(&mut self, module: &ExtensionModule<E>) {
        log::debug!("Scanning extension module '{}'", module.name);
        for factory in module.factories {
            let type_id = (factory.type_id)();
            if self.has_type_id(type_id) {
                log::trace!(
                    "Extension type '{}' already registered, skipping",
                    crate::utils::short_type_name(factory.type_name)
                );
                continue;
            }
            match (factory.construct)() {
                Ok(instance) => self.push_entry(type_id, instance),
                Err(source) => {
                    // One broken factory never aborts the scan; report it
                    // and continue with the remaining types.
                    let err = ExtensionSystemError::ConstructionFailed {
                        type_name: factory.type_name.to_string(),
                        source,
                    };
                    (self.discover_fail)(factory.type_name, &err);
                }
            }
        }
    }

    /// Register an already-constructed extension.
    ///
    /// Unlike discovery, which silently skips types it has already seen, a
    /// direct registration of a duplicate concrete type is an error.
    pub fn register_boxed(&mut self, instance: Box<E>) -> Result<&mut Self, ExtensionSystemError> {
        let type_id = instance.as_extension().as_any().type_id();
        if self.has_type_id(type_id) {
            return Err(ExtensionSystemError::DuplicateExtension {
                type_name: instance.as_extension().name().to_string(),
            });
        }
        self.push_entry(type_id, instance);
        Ok(self.sort())
    }

    fn push_entry(&mut self, type_id: TypeId, instance: Box<E>) {
        log::trace!(
            "Registered extension '{}' at priority {}",
            instance.as_extension().name(),
            instance.as_extension().priority()
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(RegistryEntry {
            type_id,
            seq,
            instance,
        });
    }

    fn has_type_id(&self, type_id: TypeId) -> bool {
        self.entries.iter().any(|entry| entry.type_id == type_id)
    }

    /// Invoke `op` on every registered extension, in current priority
    /// order, synchronously. The registry does not catch panics raised by
    /// `op`; callbacks own their own failure handling.
    pub fn execute<F>(&mut self, mut op: F) -> &mut Self
    where
        F: FnMut(&mut E),
    {
        for entry in &mut self.entries {
            op(&mut *entry.instance);
        }
        self
    }

    /// Broadcast with one extra argument reborrowed into every call,
    /// letting a whole phase share one external context object.
    pub fn execute_with<F, C>(&mut self, mut op: F, ctx: &mut C) -> &mut Self
    where
        F: FnMut(&mut E, &mut C),
        C: ?Sized,
    {
        for entry in &mut self.entries {
            op(&mut *entry.instance, ctx);
        }
        self
    }

    /// Broadcast with two extra arguments reborrowed into every call.
    pub fn execute_with2<F, A, B>(&mut self, mut op: F, a: &mut A, b: &mut B) -> &mut Self
    where
        F: FnMut(&mut E, &mut A, &mut B),
        A: ?Sized,
        B: ?Sized,
    {
        for entry in &mut self.entries {
            op(&mut *entry.instance, a, b);
        }
        self
    }

    /// Broadcast a fallible operation. The first error aborts the
    /// remaining extensions in this broadcast and propagates to the
    /// caller; extensions already visited are not rolled back.
    pub fn try_execute<F, Err>(&mut self, mut op: F) -> Result<&mut Self, Err>
    where
        F: FnMut(&mut E) -> Result<(), Err>,
    {
        for entry in &mut self.entries {
            op(&mut *entry.instance)?;
        }
        Ok(self)
    }

    /// Stable sort by ascending `(priority, registration sequence)`.
    ///
    /// Idempotent: sorting an already-sorted registry changes nothing
    /// observable. Equal priorities keep their registration order, which
    /// makes the full order deterministic across runs.
    pub fn sort(&mut self) -> &mut Self {
        self.entries
            .sort_by_key(|entry| (entry.instance.as_extension().priority(), entry.seq));
        self
    }

    /// Dispose every registered extension exactly once, in current order,
    /// and clear the registry. Safe to call when already empty.
    pub fn free(&mut self) -> &mut Self {
        for entry in &mut self.entries {
            log::trace!(
                "Disposing extension '{}'",
                entry.instance.as_extension().name()
            );
            entry.instance.as_extension_mut().dispose();
        }
        self.entries.clear();
        self
    }

    /// Number of registered extensions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no extensions
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the registered extensions in current order
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().map(|entry| &*entry.instance)
    }

    /// Iterate mutably over the registered extensions in current order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> {
        self.entries.iter_mut().map(|entry| &mut *entry.instance)
    }

    /// Whether an instance of the concrete type `T` is registered
    pub fn contains<T: Extension>(&self) -> bool {
        self.has_type_id(TypeId::of::<T>())
    }

    /// Typed access to the registered instance of `T`, if any
    pub fn get<T: Extension>(&self) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.type_id == TypeId::of::<T>())
            .and_then(|entry| entry.instance.as_extension().as_any().downcast_ref::<T>())
    }

    /// Typed mutable access to the registered instance of `T`, if any
    pub fn get_mut<T: Extension>(&mut self) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|entry| entry.type_id == TypeId::of::<T>())
            .and_then(|entry| entry.instance.as_extension_mut().as_any_mut().downcast_mut::<T>())
    }

    /// Replace the discovery failure hook. The hook receives the failing
    /// factory's type name and the construction error.
    pub fn set_discover_fail_hook<F>(&mut self, hook: F) -> &mut Self
    where
        F: FnMut(&str, &ExtensionSystemError) + Send + 'static,
    {
        self.discover_fail = Box::new(hook);
        self
    }
}

impl<E: AsExtension + ?Sized + 'static> Default for ExtensionRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Dropping the registry frees whatever is still registered, so every
/// extension is disposed on all exit paths. An explicit `free` beforehand
/// leaves nothing for the drop to do.
impl<E: AsExtension + ?Sized + 'static> Drop for ExtensionRegistry<E> {
    fn drop(&mut self) {
        self.free();
    }
}
