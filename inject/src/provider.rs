//! Providers produce instances of one implementation type and own its scope.

use crate::context::InjectionContext;
use crate::error::{ResolveError, Result};
use crate::inject::{Dependencies, Implements, Injectable};
use crate::key::TypeKey;
use crate::wait::{self, SlotId};
use once_cell::sync::OnceCell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::trace;

/// How long a provided instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scope {
  /// A new instance for every resolution.
  #[default]
  Transient,
  /// One instance per provider, created on first resolution and cached for the
  /// lifetime of the container that owns the provider.
  Singleton,
}

type Factory<T> = Box<dyn Fn(&mut InjectionContext<'_>) -> Result<T> + Send + Sync>;

/// Produces instances of the implementation type `T`.
///
/// A provider is shared between the container's registration table and the
/// [`ScopeConfigurator`](crate::ScopeConfigurator) returned when it was bound,
/// so scope changes made through the configurator are seen by later lookups.
pub struct Provider<T> {
  key: TypeKey,
  manifest: Vec<TypeKey>,
  factory: Option<Factory<T>>,
  singleton: AtomicBool,
  slot: SlotId,
  instance: OnceCell<Arc<T>>,
}

impl<T: Send + Sync + 'static> Provider<T> {
  pub(crate) fn from_factory(
    key: TypeKey,
    manifest: Vec<TypeKey>,
    scope: Scope,
    factory: impl Fn(&mut InjectionContext<'_>) -> Result<T> + Send + Sync + 'static,
  ) -> Self {
    Self {
      key,
      manifest,
      factory: Some(Box::new(factory)),
      singleton: AtomicBool::new(scope == Scope::Singleton),
      slot: wait::next_slot(),
      instance: OnceCell::new(),
    }
  }

  pub(crate) fn from_instance(instance: T) -> Self {
    Self {
      key: TypeKey::of::<T>(),
      manifest: Vec::new(),
      factory: None,
      singleton: AtomicBool::new(true),
      slot: wait::next_slot(),
      instance: OnceCell::with_value(Arc::new(instance)),
    }
  }

  /// Produces an instance, constructing it unless a cached singleton exists.
  ///
  /// The implementation type stays on the context's stack while its
  /// dependencies are resolved. Concurrent first resolutions of a singleton
  /// construct it exactly once; the other callers block until it is published.
  /// A caller whose wait would close a loop with other resolutions gets
  /// [`ResolveError::CircularDependency`] instead of blocking.
  pub fn provide(&self, context: &mut InjectionContext<'_>) -> Result<Arc<T>> {
    let mut guard = context.enter(self.key)?;

    if !self.singleton.load(Ordering::Acquire) {
      return self.construct(&mut guard).map(Arc::new);
    }

    loop {
      if let Some(instance) = self.instance.get() {
        trace!(implementation = self.key.name(), "singleton cache hit");
        return Ok(Arc::clone(instance));
      }

      let claim = wait::claim(self.slot, self.key, guard.resolution(), || {
        self.instance.get().is_some()
      })
      .map_err(|waits| guard.circular_through(&waits))?;

      // Without a claim the slot was filled while waiting.
      if let Some(_claim) = claim {
        return self
          .instance
          .get_or_try_init(|| self.construct(&mut guard).map(Arc::new))
          .map(Arc::clone);
      }
    }
  }

  fn construct(&self, context: &mut InjectionContext<'_>) -> Result<T> {
    let factory = self.factory.as_ref().ok_or_else(|| ResolveError::FactoryFailed {
      type_name: self.key.name(),
      message: "pre-built instance cannot be constructed again".to_owned(),
    })?;
    trace!(
      implementation = self.key.name(),
      dependencies = ?self.manifest,
      depth = context.depth(),
      "constructing instance"
    );
    factory(context)
  }
}

impl<T: Injectable> Provider<T> {
  /// A provider that builds `T` from its declared dependencies.
  pub fn constructor(scope: Scope) -> Self {
    Self::from_factory(
      TypeKey::with_name::<T>(T::display_name()),
      T::Dependencies::manifest(),
      scope,
      |context| Ok(T::inject(T::Dependencies::resolve(context)?)),
    )
  }
}

impl<T> Provider<T> {
  pub fn implementation(&self) -> TypeKey {
    self.key
  }

  /// Dependency identities resolved by the constructor, in order.
  /// Empty for closure factories and pre-built instances.
  pub fn manifest(&self) -> &[TypeKey] {
    &self.manifest
  }

  pub fn scope(&self) -> Scope {
    if self.singleton.load(Ordering::Acquire) {
      Scope::Singleton
    } else {
      Scope::Transient
    }
  }

  /// Changes the scope for resolutions that start after this call.
  ///
  /// An instance that is already cached stays cached; it is served again
  /// whenever the provider is in singleton scope.
  pub fn set_scope(&self, scope: Scope) {
    self
      .singleton
      .store(scope == Scope::Singleton, Ordering::Release);
  }

  /// Whether a singleton instance has been produced and cached.
  pub fn is_cached(&self) -> bool {
    self.instance.get().is_some()
  }
}

impl<T> fmt::Debug for Provider<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Provider")
      .field("implementation", &self.key)
      .field("manifest", &self.manifest)
      .field("scope", &self.scope())
      .field("cached", &self.is_cached())
      .finish_non_exhaustive()
  }
}

/// Type-erased view of a binding, used for lookups that do not know the
/// implementation type.
pub(crate) trait Binding: Send + Sync {
  fn implementation(&self) -> TypeKey;
  fn manifest(&self) -> &[TypeKey];
}

/// Serves instances of an abstraction `I`.
pub(crate) trait Retriever<I: ?Sized>: Send + Sync {
  fn forward(&self, context: &mut InjectionContext<'_>) -> Result<Arc<I>>;
}

/// Binds a provider of `T` to the abstraction `I`, converting on the way out.
pub(crate) struct CastBinding<T, I: ?Sized> {
  provider: Arc<Provider<T>>,
  _interface: PhantomData<fn() -> Arc<I>>,
}

impl<T, I: ?Sized> CastBinding<T, I> {
  pub(crate) fn new(provider: Arc<Provider<T>>) -> Self {
    Self {
      provider,
      _interface: PhantomData,
    }
  }
}

impl<T, I> Binding for CastBinding<T, I>
where
  T: Send + Sync + 'static,
  I: ?Sized + 'static,
{
  fn implementation(&self) -> TypeKey {
    self.provider.implementation()
  }

  fn manifest(&self) -> &[TypeKey] {
    self.provider.manifest()
  }
}

impl<T, I> Retriever<I> for CastBinding<T, I>
where
  T: Implements<I>,
  I: ?Sized + 'static,
{
  fn forward(&self, context: &mut InjectionContext<'_>) -> Result<Arc<I>> {
    self
      .provider
      .provide(context)
      .map(<T as Implements<I>>::upcast)
  }
}
