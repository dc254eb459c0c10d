//! Registration macros for extension points and modules.
//!
//! Discovery is linker-collected rather than reflective: each extension
//! crate declares a static [`ExtensionModule`](crate::extension_system::factory::ExtensionModule)
//! and submits it through `inventory`. At discovery time the registry
//! collects every submission for an extension point and walks the listed
//! factories.

/// Declares an extension point: a marker type, the inventory wrapper it
/// collects registrations under, and the
/// [`ExtensionPoint`](crate::extension_system::factory::ExtensionPoint)
/// implementation tying the two together.
///
/// ```text
/// extension_point! {
///     /// Collection point for host lifecycle modules.
///     pub HostModules(HostModuleReg): HostModule
/// }
/// ```
///
/// `HostModules` becomes the type passed to
/// [`ExtensionRegistry::discover`](crate::extension_system::registry::ExtensionRegistry::discover);
/// `HostModuleReg` is the wrapper `extension_module!` submits through.
#[macro_export]
macro_rules! extension_point {
    (
        $(#[$meta:meta])*
        $vis:vis $point:ident ( $reg:ident ) : $target:path
    ) => {
        $(#[$meta])*
        $vis struct $point;

        /// Registration wrapper collected via `inventory`.
        $vis struct $reg($vis &'static $crate::extension_system::factory::ExtensionModule<dyn $target>);

        $crate::inventory::collect!($reg);

        impl $crate::extension_system::traits::AsExtension for dyn $target {
            fn as_extension(&self) -> &dyn $crate::extension_system::traits::Extension {
                self
            }

            fn as_extension_mut(
                &mut self,
            ) -> &mut dyn $crate::extension_system::traits::Extension {
                self
            }
        }

        impl $crate::extension_system::factory::ExtensionPoint for $point {
            type Target = dyn $target;

            fn modules() -> ::std::vec::Vec<&'static $crate::extension_system::factory::ExtensionModule<dyn $target>> {
                let mut modules = ::std::vec::Vec::new();
                for reg in $crate::inventory::iter::<$reg> {
                    modules.push(reg.0);
                }
                modules
            }
        }
    };
}

/// Declares one named extension module and links it into an extension
/// point's collection.
///
/// ```text
/// extension_module! {
///     reg: keel_core::host::HostModuleReg,
///     target: keel_core::host::HostModule,
///     module: host_baseline,
///     extensions: [
///         BaselineModule,
///         CertBoundModule => CertBoundModule::from_env(),
///     ]
/// }
/// ```
///
/// Each entry is either a bare type, constructed through `Default`, or
/// `Type => expr` where the expression evaluates to `Result<Type, E>` for
/// any `E` convertible into
/// [`BoxError`](crate::extension_system::traits::BoxError). Every entry
/// requires a trailing comma. The module ident doubles as its name in
/// discovery scans, which visit modules in name order.
#[macro_export]
macro_rules! extension_module {
    (
        reg: $reg:path,
        target: $target:path,
        module: $module:ident,
        extensions: [ $( $ty:path $( => $ctor:expr )? , )+ ] $(,)?
    ) => {
        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        static $module: $crate::extension_system::factory::ExtensionModule<dyn $target> =
            $crate::extension_system::factory::ExtensionModule {
                name: stringify!($module),
                factories: &[
                    $(
                        $crate::extension_system::factory::ExtensionFactory {
                            type_name: stringify!($ty),
                            type_id: || ::std::any::TypeId::of::<$ty>(),
                            construct: $crate::extension_module!(@ctor $target, $ty $(, $ctor)?),
                        },
                    )+
                ],
            };

        $crate::inventory::submit!($reg(&$module));
    };

    // Internal: constructor thunk for a Default-built type.
    (@ctor $target:path, $ty:path) => {
        || {
            ::std::result::Result::Ok(
                ::std::boxed::Box::new(<$ty as ::std::default::Default>::default())
                    as ::std::boxed::Box<dyn $target>,
            )
        }
    };

    // Internal: constructor thunk for a fallible `Type => expr` entry.
    (@ctor $target:path, $ty:path, $ctor:expr) => {
        || {
            // The annotation pins the Ok type so the coercion below has a
            // concrete source even when the expression is a bare `Err(..)`.
            let constructed: ::std::result::Result<$ty, _> = $ctor;
            match constructed {
                ::std::result::Result::Ok(ext) => ::std::result::Result::Ok(
                    ::std::boxed::Box::new(ext) as ::std::boxed::Box<dyn $target>,
                ),
                ::std::result::Result::Err(err) => ::std::result::Result::Err(err.into()),
            }
        }
    };
}
