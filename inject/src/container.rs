//! The main `Container` struct and its associated methods.

use crate::binding::BindingBuilder;
use crate::config::ContainerConfig;
use crate::context::InjectionContext;
use crate::error::{ResolveError, Result};
use crate::inject::Implements;
use crate::key::TypeKey;
use crate::provider::{Binding, CastBinding, Provider, Retriever};
use dashmap::DashMap;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// One entry in a registration table.
#[derive(Clone)]
struct Registration {
  binding: Arc<dyn Binding>,
  // An `Arc<dyn Retriever<I>>` for the interface the entry is keyed under.
  retriever: Arc<dyn Any + Send + Sync>,
}

impl Registration {
  fn new<I, T>(provider: Arc<Provider<T>>) -> Self
  where
    I: ?Sized + 'static,
    T: Implements<I>,
  {
    let binding = Arc::new(CastBinding::<T, I>::new(provider));
    let retriever: Arc<dyn Retriever<I>> = binding.clone();
    Self {
      binding,
      retriever: Arc::new(retriever),
    }
  }

  fn retriever<I: ?Sized + 'static>(&self) -> Option<Arc<dyn Retriever<I>>> {
    self
      .retriever
      .downcast_ref::<Arc<dyn Retriever<I>>>()
      .cloned()
  }
}

/// A dependency injection container.
///
/// A container maps abstractions to the providers that serve them and builds
/// object graphs on request. Containers can be nested: a child created with
/// [`Container::child`] borrows its parent, answers from its own bindings
/// first and falls back to the parent chain for everything else.
///
/// Registration takes `&self`. The intended pattern is to finish binding before
/// resolving; resolution itself is safe to run from many threads at once.
pub struct Container<'p> {
  registrations: DashMap<TypeKey, Vec<Registration>>,
  parent: Option<&'p Container<'p>>,
  config: ContainerConfig,
}

impl Container<'static> {
  /// Creates a new, empty root `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      registrations: DashMap::new(),
      parent: None,
      config,
    }
  }
}

impl Default for Container<'_> {
  fn default() -> Self {
    Self {
      registrations: DashMap::new(),
      parent: None,
      config: ContainerConfig::default(),
    }
  }
}

impl<'p> Container<'p> {
  /// Creates a child container that falls back to `self` for missing bindings.
  ///
  /// The child inherits the default scope but not the label.
  pub fn child(&self) -> Container<'_> {
    let config = ContainerConfig::new().with_default_scope(self.config.default_scope);
    self.child_with_config(config)
  }

  pub fn child_with_config(&self, config: ContainerConfig) -> Container<'_> {
    debug!(
      parent = self.config.label(),
      child = config.label(),
      "created child container"
    );
    Container {
      registrations: DashMap::new(),
      parent: Some(self),
      config,
    }
  }

  pub fn parent(&self) -> Option<&'p Container<'p>> {
    self.parent
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  // --- Registration ---

  /// Starts a binding for the abstraction `I`.
  ///
  /// # Examples
  ///
  /// ```
  /// use fibre_inject::{implements, Container, Injectable};
  /// use std::sync::Arc;
  ///
  /// trait Runner: Send + Sync {}
  ///
  /// struct Cheetah;
  /// impl Runner for Cheetah {}
  /// impl Injectable for Cheetah {
  ///   type Dependencies = ();
  ///   fn inject(_: ()) -> Self {
  ///     Cheetah
  ///   }
  /// }
  /// implements!(dyn Runner => Cheetah);
  ///
  /// let container = Container::new();
  /// container.bind::<dyn Runner>().to::<Cheetah>().as_singleton();
  ///
  /// let first = container.get::<dyn Runner>().unwrap();
  /// let second = container.get::<dyn Runner>().unwrap();
  /// assert!(Arc::ptr_eq(&first, &second));
  /// ```
  pub fn bind<I: ?Sized + 'static>(&self) -> BindingBuilder<'_, 'p, I> {
    BindingBuilder::new(self)
  }

  pub(crate) fn register<I, T>(&self, provider: Arc<Provider<T>>)
  where
    I: ?Sized + 'static,
    T: Implements<I>,
  {
    let interface = TypeKey::of::<I>();
    debug!(
      container = self.config.label(),
      interface = interface.name(),
      implementation = provider.implementation().name(),
      "registered binding"
    );
    self
      .registrations
      .entry(interface)
      .or_default()
      .push(Registration::new::<I, T>(provider));
  }

  // --- Resolution ---

  /// Resolves `T`, constructing whatever part of its dependency graph is needed.
  ///
  /// `T` is the bound type itself (`dyn Runner`, `Cheetah`); the result is
  /// always handed out as an `Arc<T>`. Asking for `Arc<dyn Runner>` looks up a
  /// different key and fails with [`ResolveError::ComponentNotFound`] unless
  /// that wrapper type was bound on its own.
  pub fn get<T: ?Sized + 'static>(&self) -> Result<Arc<T>> {
    let mut context = InjectionContext::new(self);
    self.get_in::<T>(&mut context)
  }

  /// Resolves `T` as part of an ongoing resolution.
  ///
  /// Uses the first binding for `T` found in this container, or else in the
  /// nearest ancestor that has one.
  pub fn get_in<T: ?Sized + 'static>(&self, context: &mut InjectionContext<'_>) -> Result<Arc<T>> {
    let key = TypeKey::of::<T>();
    trace!(
      container = self.config.label(),
      component = key.name(),
      depth = context.depth(),
      "resolving component"
    );

    let mut retrievers = Vec::new();
    self.collect_retrievers::<T>(&key, &mut retrievers);

    match retrievers.into_iter().next() {
      Some(retriever) => retriever.forward(context),
      None => {
        debug!(
          container = self.config.label(),
          component = key.name(),
          "component not found"
        );
        Err(ResolveError::ComponentNotFound {
          type_name: key.name(),
        })
      }
    }
  }

  /// Whether `T` is bound in this container or one of its ancestors.
  pub fn contains<T: ?Sized + 'static>(&self) -> bool {
    self.first_binding(&TypeKey::of::<T>()).is_some()
  }

  // Own bindings in declaration order, then the ancestors'.
  fn collect_retrievers<T: ?Sized + 'static>(
    &self,
    key: &TypeKey,
    retrievers: &mut Vec<Arc<dyn Retriever<T>>>,
  ) {
    if let Some(entry) = self.registrations.get(key) {
      retrievers.extend(entry.iter().filter_map(Registration::retriever::<T>));
    }
    if let Some(parent) = self.parent {
      parent.collect_retrievers(key, retrievers);
    }
  }

  fn first_binding(&self, key: &TypeKey) -> Option<Arc<dyn Binding>> {
    let own = self
      .registrations
      .get(key)
      .and_then(|entry| entry.first().map(|registration| Arc::clone(&registration.binding)));
    own.or_else(|| self.parent.and_then(|parent| parent.first_binding(key)))
  }

  // --- Validation ---

  /// Checks every binding visible from this container without constructing anything.
  ///
  /// Follows the dependency manifests of the bindings that resolution would
  /// use and reports each missing dependency and each cycle. Bindings made with
  /// `to_factory` or `to_instance` have no manifest and are treated as leaves.
  pub fn validate(&self) -> std::result::Result<(), Vec<ResolveError>> {
    let mut interfaces = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(self);
    while let Some(container) = current {
      for entry in container.registrations.iter() {
        if seen.insert(*entry.key()) {
          interfaces.push(*entry.key());
        }
      }
      current = container.parent;
    }

    let mut errors = Vec::new();
    let mut finished = HashSet::new();
    for interface in interfaces {
      let mut path = Vec::new();
      self.visit(interface, &mut path, &mut finished, &mut errors);
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors)
    }
  }

  fn visit(
    &self,
    interface: TypeKey,
    path: &mut Vec<TypeKey>,
    finished: &mut HashSet<TypeKey>,
    errors: &mut Vec<ResolveError>,
  ) {
    if finished.contains(&interface) {
      return;
    }

    let Some(binding) = self.first_binding(&interface) else {
      errors.push(ResolveError::ComponentNotFound {
        type_name: interface.name(),
      });
      finished.insert(interface);
      return;
    };

    let implementation = binding.implementation();
    if path.contains(&implementation) {
      let chain = path
        .iter()
        .chain(std::iter::once(&implementation))
        .map(TypeKey::name)
        .collect::<Vec<_>>()
        .join(" -> ");
      errors.push(ResolveError::CircularDependency {
        type_name: implementation.name(),
        chain,
      });
      return;
    }

    path.push(implementation);
    for dependency in binding.manifest() {
      self.visit(*dependency, path, finished, errors);
    }
    path.pop();
    finished.insert(interface);
  }
}

impl fmt::Debug for Container<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("label", &self.config.label)
      .field("interfaces", &self.registrations.len())
      .field("has_parent", &self.parent.is_some())
      .finish()
  }
}
