//! Static descriptors for extension construction.
//!
//! Extension crates do not hand live instances to the registry; they
//! contribute `'static` [`ExtensionModule`] values listing one
//! [`ExtensionFactory`] per concrete type. The registry walks those
//! descriptors during discovery and instantiates each type at most once.
//! Modules are collected per [`ExtensionPoint`] through the
//! [`extension_point!`](crate::extension_point) and
//! [`extension_module!`](crate::extension_module) macros.

use std::any::TypeId;

use crate::extension_system::traits::{AsExtension, BoxError};

/// Describes how to produce one concrete extension type.
pub struct ExtensionFactory<E: ?Sized> {
    /// Display identifier for the concrete type, used when construction
    /// fails and no instance exists to ask.
    pub type_name: &'static str,
    /// Thunk yielding the concrete [`TypeId`], the registry's dedup key.
    pub type_id: fn() -> TypeId,
    /// Constructor. Errors are caught by the registry during discovery,
    /// reported through its failure hook, and never abort the scan.
    pub construct: fn() -> Result<Box<E>, BoxError>,
}

/// A named group of factories contributed by one crate.
///
/// This is the unit a discovery scan walks: `discover` visits every
/// registered module for an extension point, `discover_module` visits
/// exactly one.
pub struct ExtensionModule<E: ?Sized + 'static> {
    /// Module name; full scans visit modules in name order so results do
    /// not depend on link order.
    pub name: &'static str,
    /// Factories in declaration order.
    pub factories: &'static [ExtensionFactory<E>],
}

/// One extension kind, e.g. host modules or themes.
///
/// Implemented by the marker type the [`extension_point!`](crate::extension_point)
/// macro declares; ties the marker to the trait-object type its registry
/// stores and to the collected set of module registrations.
pub trait ExtensionPoint {
    /// The trait-object type this point's registry stores.
    type Target: AsExtension + ?Sized + 'static;

    /// All modules registered for this point, in registration order.
    fn modules() -> Vec<&'static ExtensionModule<Self::Target>>;
}
