//! Fluent registration helpers returned by [`Container::bind`].

use crate::container::Container;
use crate::context::InjectionContext;
use crate::error::Result;
use crate::inject::{Implements, Injectable};
use crate::key::TypeKey;
use crate::provider::{Provider, Scope};
use std::marker::PhantomData;
use std::sync::Arc;

/// Chooses the implementation served for the abstraction `I`.
///
/// Nothing is registered until one of the `to*` methods is called.
pub struct BindingBuilder<'c, 'p, I: ?Sized> {
  container: &'c Container<'p>,
  _interface: PhantomData<fn() -> Arc<I>>,
}

impl<'c, 'p, I: ?Sized + 'static> BindingBuilder<'c, 'p, I> {
  pub(crate) fn new(container: &'c Container<'p>) -> Self {
    Self {
      container,
      _interface: PhantomData,
    }
  }

  /// Serves `I` with instances of `T`, built from `T`'s declared dependencies.
  ///
  /// The binding is appended after any existing binding for `I` in this
  /// container; resolution always uses the first one.
  pub fn to<T>(self) -> ScopeConfigurator<T>
  where
    T: Injectable + Implements<I>,
  {
    let scope = self.container.config().default_scope;
    self.register(Provider::<T>::constructor(scope))
  }

  /// Serves `I` with instances produced by `factory`.
  ///
  /// The factory may resolve its own dependencies through the context it is
  /// given. Nothing about them is known ahead of time, so they are not part of
  /// [`Container::validate`].
  pub fn to_factory<T, F>(self, factory: F) -> ScopeConfigurator<T>
  where
    T: Implements<I>,
    F: Fn(&mut InjectionContext<'_>) -> Result<T> + Send + Sync + 'static,
  {
    let scope = self.container.config().default_scope;
    self.register(Provider::from_factory(
      TypeKey::of::<T>(),
      Vec::new(),
      scope,
      factory,
    ))
  }

  /// Serves `I` with an already built instance. The binding is always a singleton.
  pub fn to_instance<T>(self, instance: T)
  where
    T: Implements<I>,
  {
    self.register(Provider::from_instance(instance));
  }

  fn register<T>(self, provider: Provider<T>) -> ScopeConfigurator<T>
  where
    T: Implements<I>,
  {
    let provider = Arc::new(provider);
    self.container.register::<I, T>(Arc::clone(&provider));
    ScopeConfigurator { provider }
  }
}

impl<T: Injectable> BindingBuilder<'_, '_, T> {
  /// Binds `T` to itself. Equivalent to `to::<T>()`.
  pub fn to_self(self) -> ScopeConfigurator<T> {
    self.to::<T>()
  }
}

/// Adjusts the scope of a binding after it has been registered.
///
/// Scope changes apply to resolutions that start afterwards; configure the
/// scope before the first resolution to get a single instance for the whole
/// lifetime of the container.
pub struct ScopeConfigurator<T> {
  provider: Arc<Provider<T>>,
}

impl<T> ScopeConfigurator<T> {
  /// Caches the first instance produced and serves it to every later resolution.
  pub fn as_singleton(self) -> Self {
    self.provider.set_scope(Scope::Singleton);
    self
  }

  pub fn as_transient(self) -> Self {
    self.provider.set_scope(Scope::Transient);
    self
  }

  /// The provider shared with the container's registration table.
  pub fn provider(&self) -> &Arc<Provider<T>> {
    &self.provider
  }
}
