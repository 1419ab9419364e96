//! # Fibre Inject
//!
//! A thread-safe constructor-injection container for Rust.
//!
//! Application code asks for an abstraction, usually a trait object, and the
//! container decides which implementation to build, resolving the
//! implementation's constructor dependencies recursively.
//!
//! ## Core Concepts
//!
//! - **Container**: maps abstractions to providers. Containers can be nested;
//!   a child answers from its own bindings first and falls back to its parent.
//! - **Injectable**: implemented by every constructible type to declare its
//!   ordered constructor dependencies.
//! - **Scope**: bindings are transient by default (a new instance per
//!   resolution) or singletons (one instance per provider, built exactly once
//!   even under concurrent first access).
//! - **Cycle detection**: each resolution tracks the implementations under
//!   construction and fails with [`ResolveError::CircularDependency`] instead
//!   of recursing forever.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{implements, Container, Injectable};
//! use std::sync::Arc;
//!
//! trait Nest: Send + Sync {
//!   fn location(&self) -> &str;
//! }
//!
//! struct SpiderNest;
//! impl Nest for SpiderNest {
//!   fn location(&self) -> &str {
//!     "attic"
//!   }
//! }
//! impl Injectable for SpiderNest {
//!   type Dependencies = ();
//!   fn inject(_: ()) -> Self {
//!     SpiderNest
//!   }
//! }
//! implements!(dyn Nest => SpiderNest);
//!
//! struct Spider {
//!   nest: Arc<dyn Nest>,
//! }
//! impl Injectable for Spider {
//!   type Dependencies = Arc<dyn Nest>;
//!   fn inject(nest: Self::Dependencies) -> Self {
//!     Spider { nest }
//!   }
//! }
//!
//! let container = Container::new();
//! container.bind::<Spider>().to_self();
//! container.bind::<dyn Nest>().to::<SpiderNest>().as_singleton();
//!
//! let first = container.get::<Spider>().unwrap();
//! let second = container.get::<Spider>().unwrap();
//!
//! assert!(!Arc::ptr_eq(&first, &second));
//! assert!(Arc::ptr_eq(&first.nest, &second.nest));
//! assert_eq!(first.nest.location(), "attic");
//! ```

mod binding;
mod config;
mod container;
mod context;
mod error;
mod global;
mod inject;
mod key;
mod macros;
mod provider;
mod wait;

pub use binding::{BindingBuilder, ScopeConfigurator};
pub use config::ContainerConfig;
pub use container::Container;
pub use context::InjectionContext;
pub use error::{ResolveError, Result};
pub use global::global;
pub use inject::{Dependencies, Implements, Injectable};
pub use key::TypeKey;
pub use provider::{Provider, Scope};
