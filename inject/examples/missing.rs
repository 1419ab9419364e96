use fibre_inject::{resolve, Container, Injectable, ResolveError};
use std::panic;
use std::sync::Arc;

struct UnregisteredService;

struct Chicken {
  _egg: Arc<Egg>,
}
impl Injectable for Chicken {
  type Dependencies = Arc<Egg>;
  fn inject(_egg: Self::Dependencies) -> Self {
    Chicken { _egg }
  }
}

struct Egg {
  _chicken: Arc<Chicken>,
}
impl Injectable for Egg {
  type Dependencies = Arc<Chicken>;
  fn inject(_chicken: Self::Dependencies) -> Self {
    Egg { _chicken }
  }
}

fn main() {
  let container = Container::new();

  // --- Using the fallible `get()` method ---
  println!("Attempting to resolve a service that was never registered...");
  match container.get::<UnregisteredService>() {
    Err(ResolveError::ComponentNotFound { type_name }) => {
      println!("Correctly received ComponentNotFound for {}", type_name)
    }
    Err(other) => panic!("Unexpected error: {}", other),
    Ok(_) => panic!("Should not have found the service!"),
  }

  // --- Circular dependencies are reported, not recursed into ---
  container.bind::<Chicken>().to_self();
  container.bind::<Egg>().to_self();

  match container.get::<Chicken>() {
    Err(err @ ResolveError::CircularDependency { .. }) => println!("Cycle detected: {}", err),
    Err(other) => panic!("Unexpected error: {}", other),
    Ok(_) => panic!("A cyclic graph should not resolve!"),
  }

  // The same problem is visible up front, without constructing anything.
  let problems = container.validate().unwrap_err();
  println!("Validation found {} problem(s).", problems.len());

  // --- Using the panicking `resolve!` macro ---
  println!("\nNow, attempting the same with resolve!...");
  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!(UnregisteredService, Container::new());
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");
}
