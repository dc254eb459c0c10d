use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::extension_system::error::ExtensionSystemError;
use crate::extension_system::factory::{ExtensionFactory, ExtensionModule};
use crate::extension_system::priority::Priority;
use crate::extension_system::registry::ExtensionRegistry;
use crate::extension_system::traits::{Extension, ExtensionState};

type EventLog = Arc<Mutex<Vec<String>>>;

// One mock extension type per concrete identity the dedup logic needs.
macro_rules! probe_extension {
    ($name:ident, $label:literal, $priority:expr) => {
        #[derive(Default)]
        struct $name {
            state: ExtensionState,
            events: Option<EventLog>,
            dispose_calls: Option<Arc<AtomicUsize>>,
        }

        impl $name {
            #[allow(dead_code)]
            fn with_dispose_counter(counter: Arc<AtomicUsize>) -> Self {
                Self {
                    dispose_calls: Some(counter),
                    ..Self::default()
                }
            }
        }

        impl Extension for $name {
            fn name(&self) -> &'static str {
                $label
            }

            fn priority(&self) -> Priority {
                $priority
            }

            fn state(&self) -> &ExtensionState {
                &self.state
            }

            fn state_mut(&mut self) -> &mut ExtensionState {
                &mut self.state
            }

            fn on_dispose(&mut self) {
                if let Some(counter) = &self.dispose_calls {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
                if let Some(events) = &self.events {
                    events.lock().unwrap().push(format!("dispose:{}", $label));
                }
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }
    };
}

probe_extension!(RootProbe, "root-probe", Priority::Root);
probe_extension!(HighProbe, "high-probe", Priority::High);
probe_extension!(NormalProbe, "normal-probe", Priority::Normal);
probe_extension!(SecondNormalProbe, "second-normal-probe", Priority::Normal);
probe_extension!(LowProbe, "low-probe", Priority::Low);

/// Exists only to give the failing factory a concrete type identity.
struct FailingProbe;

// Factories declared in reverse priority order on purpose: discovery must
// produce ascending order regardless.
static PROBE_MODULE: ExtensionModule<dyn Extension> = ExtensionModule {
    name: "probe_module",
    factories: &[
        ExtensionFactory {
            type_name: "LowProbe",
            type_id: || TypeId::of::<LowProbe>(),
            construct: || Ok(Box::new(LowProbe::default())),
        },
        ExtensionFactory {
            type_name: "NormalProbe",
            type_id: || TypeId::of::<NormalProbe>(),
            construct: || Ok(Box::new(NormalProbe::default())),
        },
        ExtensionFactory {
            type_name: "HighProbe",
            type_id: || TypeId::of::<HighProbe>(),
            construct: || Ok(Box::new(HighProbe::default())),
        },
    ],
};

static FAULTY_MODULE: ExtensionModule<dyn Extension> = ExtensionModule {
    name: "faulty_module",
    factories: &[
        ExtensionFactory {
            type_name: "HighProbe",
            type_id: || TypeId::of::<HighProbe>(),
            construct: || Ok(Box::new(HighProbe::default())),
        },
        ExtensionFactory {
            type_name: "FailingProbe",
            type_id: || TypeId::of::<FailingProbe>(),
            construct: || Err("boom".into()),
        },
        ExtensionFactory {
            type_name: "LowProbe",
            type_id: || TypeId::of::<LowProbe>(),
            construct: || Ok(Box::new(LowProbe::default())),
        },
    ],
};

fn names(registry: &ExtensionRegistry<dyn Extension>) -> Vec<&'static str> {
    registry.iter().map(|ext| ext.name()).collect()
}

#[test]
fn discovery_sorts_reverse_declared_priorities() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.discover_module(&PROBE_MODULE);
    assert_eq!(names(&registry), vec!["high-probe", "normal-probe", "low-probe"]);
}

#[test]
fn discovery_is_idempotent() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.discover_module(&PROBE_MODULE);
    registry.discover_module(&PROBE_MODULE);
    assert_eq!(registry.len(), 3);
}

#[test]
fn direct_duplicate_registration_is_an_error() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.register_boxed(Box::new(HighProbe::default())).unwrap();
    let err = match registry.register_boxed(Box::new(HighProbe::default())) {
        Err(err) => err,
        Ok(_) => panic!("duplicate registration should have failed"),
    };
    assert!(matches!(
        err,
        ExtensionSystemError::DuplicateExtension { type_name } if type_name == "high-probe"
    ));
    assert_eq!(registry.len(), 1);
}

#[test]
fn equal_priorities_keep_registration_order() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry
        .register_boxed(Box::new(SecondNormalProbe::default()))
        .unwrap();
    registry.register_boxed(Box::new(LowProbe::default())).unwrap();
    registry
        .register_boxed(Box::new(NormalProbe::default()))
        .unwrap();

    let expected = vec!["second-normal-probe", "normal-probe", "low-probe"];
    assert_eq!(names(&registry), expected);

    // Re-sorting an already-sorted registry changes nothing observable.
    registry.sort().sort();
    assert_eq!(names(&registry), expected);
}

#[test]
fn root_sorts_before_everything() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.register_boxed(Box::new(NormalProbe::default())).unwrap();
    registry.register_boxed(Box::new(RootProbe::default())).unwrap();
    registry.register_boxed(Box::new(HighProbe::default())).unwrap();
    assert_eq!(
        names(&registry),
        vec!["root-probe", "high-probe", "normal-probe"]
    );
}

#[test]
fn construction_failure_never_aborts_the_scan() {
    let failures: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&failures);

    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.set_discover_fail_hook(move |type_name, err| {
        sink.lock()
            .unwrap()
            .push(format!("{type_name}: {err}"));
    });
    registry.discover_module(&FAULTY_MODULE);

    // Both siblings of the broken factory made it in.
    assert_eq!(registry.len(), 2);
    assert!(registry.contains::<HighProbe>());
    assert!(registry.contains::<LowProbe>());

    let failures = failures.lock().unwrap();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("FailingProbe"));
    assert!(failures[0].contains("boom"));
}

#[test]
fn broadcast_visits_every_extension_exactly_once() {
    for count in 0..=3usize {
        let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
        if count > 0 {
            registry.register_boxed(Box::new(LowProbe::default())).unwrap();
        }
        if count > 1 {
            registry.register_boxed(Box::new(HighProbe::default())).unwrap();
        }
        if count > 2 {
            registry
                .register_boxed(Box::new(NormalProbe::default()))
                .unwrap();
        }

        let mut visited = Vec::new();
        registry.execute(|ext| visited.push(ext.name()));
        assert_eq!(visited.len(), count);

        let expected: Vec<&str> = names(&registry);
        assert_eq!(visited, expected, "broadcast order for {count} extensions");
    }
}

#[test]
fn execute_with_shares_one_context() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.register_boxed(Box::new(NormalProbe::default())).unwrap();
    registry.register_boxed(Box::new(HighProbe::default())).unwrap();

    let mut context: Vec<String> = Vec::new();
    registry.execute_with(
        |ext, ctx: &mut Vec<String>| ctx.push(ext.name().to_string()),
        &mut context,
    );
    assert_eq!(context, vec!["high-probe", "normal-probe"]);
}

#[test]
fn execute_with2_forwards_both_contexts_in_priority_order() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.register_boxed(Box::new(NormalProbe::default())).unwrap();
    registry.register_boxed(Box::new(HighProbe::default())).unwrap();

    let mut visited: Vec<String> = Vec::new();
    let mut calls = 0usize;
    registry.execute_with2(
        |ext, visited: &mut Vec<String>, calls: &mut usize| {
            visited.push(ext.name().to_string());
            *calls += 1;
        },
        &mut visited,
        &mut calls,
    );

    assert_eq!(calls, 2);
    assert_eq!(visited, vec!["high-probe", "normal-probe"]);
}

#[test]
fn try_execute_aborts_on_the_first_error() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.register_boxed(Box::new(LowProbe::default())).unwrap();
    registry.register_boxed(Box::new(NormalProbe::default())).unwrap();
    registry.register_boxed(Box::new(HighProbe::default())).unwrap();

    let mut visited = Vec::new();
    let result = registry.try_execute(|ext| {
        visited.push(ext.name());
        if ext.name() == "normal-probe" {
            Err("mid-broadcast failure".to_string())
        } else {
            Ok(())
        }
    });

    let err = match result {
        Err(err) => err,
        Ok(_) => panic!("broadcast should have failed"),
    };
    assert_eq!(err, "mid-broadcast failure");
    // The failing extension was reached; the one after it was not.
    assert_eq!(visited, vec!["high-probe", "normal-probe"]);
}

#[test]
fn free_disposes_each_extension_exactly_once() {
    let high_calls = Arc::new(AtomicUsize::new(0));
    let low_calls = Arc::new(AtomicUsize::new(0));

    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry
        .register_boxed(Box::new(LowProbe::with_dispose_counter(Arc::clone(
            &low_calls,
        ))))
        .unwrap();
    registry
        .register_boxed(Box::new(HighProbe::with_dispose_counter(Arc::clone(
            &high_calls,
        ))))
        .unwrap();

    registry.free();
    assert!(registry.is_empty());

    // Repeated free and the eventual drop add nothing.
    registry.free();
    drop(registry);
    assert_eq!(high_calls.load(Ordering::SeqCst), 1);
    assert_eq!(low_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_frees_whatever_is_still_registered() {
    let calls = Arc::new(AtomicUsize::new(0));
    {
        let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
        registry
            .register_boxed(Box::new(NormalProbe::with_dispose_counter(Arc::clone(
                &calls,
            ))))
            .unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn disposal_order_follows_priority_order() {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));

    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    let mut low = LowProbe::default();
    low.events = Some(Arc::clone(&events));
    let mut high = HighProbe::default();
    high.events = Some(Arc::clone(&events));
    registry.register_boxed(Box::new(low)).unwrap();
    registry.register_boxed(Box::new(high)).unwrap();

    registry.free();
    assert_eq!(
        *events.lock().unwrap(),
        vec!["dispose:high-probe", "dispose:low-probe"]
    );
}

#[test]
fn typed_accessors_reach_the_concrete_instance() {
    let mut registry: ExtensionRegistry<dyn Extension> = ExtensionRegistry::new();
    registry.register_boxed(Box::new(HighProbe::default())).unwrap();

    assert!(registry.contains::<HighProbe>());
    assert!(!registry.contains::<LowProbe>());
    assert!(registry.get::<LowProbe>().is_none());

    registry
        .get_mut::<HighProbe>()
        .expect("instance should be present")
        .mark_executed("probe");
    assert!(registry.get::<HighProbe>().unwrap().has_executed("probe"));
}
