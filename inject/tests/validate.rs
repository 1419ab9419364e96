use fibre_inject::{implements, Container, Injectable, ResolveError};
use std::sync::Arc;

// --- Test Fixtures ---

trait Engine: Send + Sync {}

struct V8;
impl Engine for V8 {}
impl Injectable for V8 {
  type Dependencies = ();
  fn inject(_: ()) -> Self {
    V8
  }
}
implements!(dyn Engine => V8);

struct Wheels;

struct Car {
  _engine: Arc<dyn Engine>,
  _wheels: Arc<Wheels>,
}
impl Injectable for Car {
  type Dependencies = (Arc<dyn Engine>, Arc<Wheels>);
  fn inject((_engine, _wheels): Self::Dependencies) -> Self {
    Car { _engine, _wheels }
  }
}

struct Ping {
  _pong: Arc<Pong>,
}
impl Injectable for Ping {
  type Dependencies = Arc<Pong>;
  fn inject(_pong: Self::Dependencies) -> Self {
    Ping { _pong }
  }
}

struct Pong {
  _ping: Arc<Ping>,
}
impl Injectable for Pong {
  type Dependencies = Arc<Ping>;
  fn inject(_ping: Self::Dependencies) -> Self {
    Pong { _ping }
  }
}

// --- Validation Tests ---

#[test]
fn test_complete_graph_validates() {
  let container = Container::new();
  container.bind::<dyn Engine>().to::<V8>();
  container.bind::<Wheels>().to_instance(Wheels);
  container.bind::<Car>().to_self();

  assert!(container.validate().is_ok());
  assert!(container.get::<Car>().is_ok());
}

#[test]
fn test_missing_dependency_is_reported_without_constructing() {
  let container = Container::new();
  container.bind::<dyn Engine>().to::<V8>();
  container.bind::<Car>().to_self();

  let errors = container.validate().err().unwrap();

  assert_eq!(errors.len(), 1);
  match &errors[0] {
    ResolveError::ComponentNotFound { type_name } => assert!(type_name.ends_with("Wheels")),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_cycle_is_reported_once() {
  let container = Container::new();
  container.bind::<Ping>().to_self();
  container.bind::<Pong>().to_self();

  let errors = container.validate().err().unwrap();

  assert_eq!(errors.len(), 1);
  assert!(matches!(errors[0], ResolveError::CircularDependency { .. }));
}

#[test]
fn test_child_validation_sees_parent_bindings() {
  let parent = Container::new();
  parent.bind::<Car>().to_self();
  parent.bind::<dyn Engine>().to::<V8>();

  let child = parent.child();
  // Incomplete on its own, complete once the child supplies the wheels.
  assert!(parent.validate().is_err());
  child.bind::<Wheels>().to_instance(Wheels);
  assert!(child.validate().is_ok());
}

#[test]
fn test_factory_bindings_are_leaves() {
  let container = Container::new();
  container
    .bind::<Wheels>()
    .to_factory(|context| {
      // Not visible to validation: only discovered when the factory runs.
      context.resolve::<dyn Engine>()?;
      Ok(Wheels)
    });

  assert!(container.validate().is_ok());
  assert!(container.get::<Wheels>().is_err());
}
