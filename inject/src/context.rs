//! The per-resolution stack used to detect circular dependencies.

use crate::container::Container;
use crate::error::{ResolveError, Result};
use crate::key::TypeKey;
use crate::wait::{self, ResolutionId};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::debug;

/// State shared by every step of one top-level resolution.
///
/// A context records the implementation types currently under construction,
/// outermost first, above a private root marker. It belongs to a single
/// resolution call tree and must not be shared between concurrent resolutions.
///
/// Dependencies are always resolved through the container the context was
/// created for, even when the provider being run was registered on an ancestor.
pub struct InjectionContext<'a> {
  id: ResolutionId,
  container: &'a Container<'a>,
  stack: Vec<TypeKey>,
}

impl<'a> InjectionContext<'a> {
  pub fn new(container: &'a Container<'a>) -> Self {
    Self {
      id: wait::next_resolution(),
      container,
      stack: vec![TypeKey::root()],
    }
  }

  pub fn container(&self) -> &'a Container<'a> {
    self.container
  }

  /// Resolves a dependency as part of this resolution.
  pub fn resolve<T: ?Sized + 'static>(&mut self) -> Result<Arc<T>> {
    let container = self.container;
    container.get_in::<T>(self)
  }

  /// The types currently being constructed, excluding the root marker.
  pub fn stack(&self) -> &[TypeKey] {
    &self.stack[1..]
  }

  /// Number of constructions in progress.
  pub fn depth(&self) -> usize {
    self.stack.len() - 1
  }

  pub(crate) fn resolution(&self) -> ResolutionId {
    self.id
  }

  /// The error for a loop that passes from this resolution's stack through
  /// singletons other resolutions are building, ending at `waits`.
  pub(crate) fn circular_through(&self, waits: &[TypeKey]) -> ResolveError {
    circular(self.stack[1..].iter().chain(waits))
  }

  /// Marks `key` as under construction until the returned guard is dropped.
  ///
  /// Fails if `key` is already on the stack; the entry is popped again before
  /// the error is returned.
  pub(crate) fn enter(&mut self, key: TypeKey) -> Result<ResolutionGuard<'_, 'a>> {
    self.stack.push(key);
    let guard = ResolutionGuard { context: self };
    guard.ensure_no_cycle()?;
    Ok(guard)
  }
}

/// Pops the entry pushed by [`InjectionContext::enter`] when dropped.
pub(crate) struct ResolutionGuard<'c, 'a> {
  context: &'c mut InjectionContext<'a>,
}

impl ResolutionGuard<'_, '_> {
  fn ensure_no_cycle(&self) -> Result<()> {
    let stack = &self.context.stack;
    let (top, below) = match stack.split_last() {
      Some(split) => split,
      None => return Ok(()),
    };
    if !below.contains(top) {
      return Ok(());
    }

    Err(circular(stack[1..].iter()))
  }
}

// The last key is the one that would be re-entered.
fn circular<'k>(path: impl Iterator<Item = &'k TypeKey> + Clone) -> ResolveError {
  let type_name = path.clone().last().map_or("<root>", TypeKey::name);
  let chain = path.map(TypeKey::name).collect::<Vec<_>>().join(" -> ");
  debug!(component = type_name, %chain, "circular dependency detected");
  ResolveError::CircularDependency { type_name, chain }
}

impl<'a> Deref for ResolutionGuard<'_, 'a> {
  type Target = InjectionContext<'a>;

  fn deref(&self) -> &Self::Target {
    self.context
  }
}

impl DerefMut for ResolutionGuard<'_, '_> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    self.context
  }
}

impl Drop for ResolutionGuard<'_, '_> {
  fn drop(&mut self) {
    self.context.stack.pop();
  }
}
