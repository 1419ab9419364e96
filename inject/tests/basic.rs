use fibre_inject::{implements, Container, Injectable, ResolveError, Scope};
use std::sync::Arc;

// --- Test Fixtures ---

trait Runner: Send + Sync {
  fn name(&self) -> &'static str;
}

struct Cheetah;
impl Runner for Cheetah {
  fn name(&self) -> &'static str {
    "cheetah"
  }
}
impl Injectable for Cheetah {
  type Dependencies = ();
  fn inject(_: ()) -> Self {
    Cheetah
  }
}

implements!(dyn Runner => Cheetah);

// --- Basic Tests ---

#[test]
fn test_transient_binding_yields_distinct_instances() {
  // Arrange
  let container = Container::new();
  container.bind::<dyn Runner>().to::<Cheetah>();

  // Act
  let runner = container.get::<dyn Runner>().unwrap();
  let runner2 = container.get::<dyn Runner>().unwrap();

  // Assert
  assert_eq!(runner.name(), "cheetah");
  assert!(!Arc::ptr_eq(&runner, &runner2));
  // Nobody but the caller holds a transient instance.
  assert_eq!(Arc::strong_count(&runner), 1);
  assert_eq!(Arc::strong_count(&runner2), 1);
}

#[test]
fn test_singleton_binding_yields_the_same_instance() {
  // Arrange
  let container = Container::new();
  container.bind::<dyn Runner>().to::<Cheetah>().as_singleton();

  // Act
  let runner = container.get::<dyn Runner>().unwrap();
  let runner2 = container.get::<dyn Runner>().unwrap();

  // Assert
  assert!(Arc::ptr_eq(&runner, &runner2));
  // One reference held by the provider's cache plus one per caller handle.
  assert_eq!(Arc::strong_count(&runner), 3);
  assert_eq!(Arc::strong_count(&runner2), 3);
}

#[test]
fn test_to_self_transient() {
  let container = Container::new();
  container.bind::<Cheetah>().to_self();

  let runner = container.get::<Cheetah>().unwrap();
  let runner2 = container.get::<Cheetah>().unwrap();

  assert!(!Arc::ptr_eq(&runner, &runner2));
  assert_eq!(Arc::strong_count(&runner), 1);
  assert_eq!(Arc::strong_count(&runner2), 1);
}

#[test]
fn test_to_self_singleton() {
  let container = Container::new();
  container.bind::<Cheetah>().to_self().as_singleton();

  let runner = container.get::<Cheetah>().unwrap();
  let runner2 = container.get::<Cheetah>().unwrap();

  assert!(Arc::ptr_eq(&runner, &runner2));
  assert_eq!(Arc::strong_count(&runner), 3);
}

#[test]
fn test_to_self_matches_explicit_self_binding() {
  let via_to_self = Container::new();
  via_to_self.bind::<Cheetah>().to_self().as_singleton();

  let via_to = Container::new();
  via_to.bind::<Cheetah>().to::<Cheetah>().as_singleton();

  for container in [&via_to_self, &via_to] {
    let first = container.get::<Cheetah>().unwrap();
    let second = container.get::<Cheetah>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(Arc::strong_count(&first), 3);
  }
}

#[test]
fn test_missing_component_is_an_error() {
  let container = Container::new();

  let err = container.get::<dyn Runner>().err().unwrap();

  match &err {
    ResolveError::ComponentNotFound { type_name } => assert!(type_name.contains("Runner")),
    other => panic!("unexpected error: {other}"),
  }
  assert!(err.to_string().starts_with("component for interface"));
  assert!(!container.contains::<dyn Runner>());
}

#[test]
fn test_binding_is_visible_through_contains() {
  let container = Container::new();
  assert!(!container.contains::<Cheetah>());

  container.bind::<Cheetah>().to_self();

  assert!(container.contains::<Cheetah>());
  assert!(!container.contains::<dyn Runner>());
}

#[test]
fn test_configurator_exposes_the_registered_provider() {
  let container = Container::new();
  let configurator = container.bind::<dyn Runner>().to::<Cheetah>();
  assert_eq!(configurator.provider().scope(), Scope::Transient);
  assert!(configurator.provider().manifest().is_empty());

  let configurator = configurator.as_singleton();
  assert_eq!(configurator.provider().scope(), Scope::Singleton);
  assert!(!configurator.provider().is_cached());

  let _runner = container.get::<dyn Runner>().unwrap();
  assert!(configurator.provider().is_cached());
}

#[test]
fn test_lookup_is_by_the_bound_type_not_its_arc() {
  let container = Container::new();
  container.bind::<dyn Runner>().to::<Cheetah>();

  assert!(container.get::<dyn Runner>().is_ok());
  let err = container.get::<Arc<dyn Runner>>().err().unwrap();
  assert!(matches!(err, ResolveError::ComponentNotFound { .. }));
  assert!(err.type_name().contains("Arc<"));
}
