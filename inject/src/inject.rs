//! Constructor injection declarations.
//!
//! An implementation type becomes constructible by the container once it
//! implements [`Injectable`], which states the ordered list of its
//! constructor dependencies and how to build itself from them. Binding it
//! against an abstraction additionally requires [`Implements`].

use crate::context::InjectionContext;
use crate::error::Result;
use crate::key::TypeKey;
use std::sync::Arc;

/// A type the container can construct by resolving its dependencies.
///
/// # Examples
///
/// ```
/// use fibre_inject::Injectable;
/// use std::sync::Arc;
///
/// trait Nest: Send + Sync {}
///
/// struct Spider {
///   nest: Arc<dyn Nest>,
/// }
///
/// impl Injectable for Spider {
///   type Dependencies = Arc<dyn Nest>;
///
///   fn inject(nest: Self::Dependencies) -> Self {
///     Spider { nest }
///   }
/// }
/// ```
#[diagnostic::on_unimplemented(
  message = "missing injection declaration for type `{Self}`",
  label = "`{Self}` does not implement `Injectable`",
  note = "implement `fibre_inject::Injectable` to declare the constructor dependencies of `{Self}`"
)]
pub trait Injectable: Send + Sync + Sized + 'static {
  /// The constructor arguments, in order: `()`, a single `Arc<D>`, or a tuple of `Arc`s.
  type Dependencies: Dependencies;

  /// Builds the instance from its resolved dependencies.
  fn inject(dependencies: Self::Dependencies) -> Self;

  /// Name used in error messages and logs.
  fn display_name() -> &'static str {
    std::any::type_name::<Self>()
  }
}

/// An ordered list of dependencies that can be resolved from a context.
pub trait Dependencies: Sized {
  /// The dependency identities, in resolution order.
  fn manifest() -> Vec<TypeKey>;

  /// Resolves every dependency, left to right, through `context`.
  fn resolve(context: &mut InjectionContext<'_>) -> Result<Self>;
}

impl Dependencies for () {
  fn manifest() -> Vec<TypeKey> {
    Vec::new()
  }

  fn resolve(_context: &mut InjectionContext<'_>) -> Result<Self> {
    Ok(())
  }
}

impl<D: ?Sized + 'static> Dependencies for Arc<D> {
  fn manifest() -> Vec<TypeKey> {
    vec![TypeKey::of::<D>()]
  }

  fn resolve(context: &mut InjectionContext<'_>) -> Result<Self> {
    context.resolve::<D>()
  }
}

macro_rules! impl_dependencies_for_tuple {
  ($($dep:ident),+) => {
    impl<$($dep: ?Sized + 'static),+> Dependencies for ($(Arc<$dep>,)+) {
      fn manifest() -> Vec<TypeKey> {
        vec![$(TypeKey::of::<$dep>()),+]
      }

      // Tuple operands are evaluated left to right, which fixes the resolution order.
      fn resolve(context: &mut InjectionContext<'_>) -> Result<Self> {
        Ok(($(context.resolve::<$dep>()?,)+))
      }
    }
  };
}

impl_dependencies_for_tuple!(D1);
impl_dependencies_for_tuple!(D1, D2);
impl_dependencies_for_tuple!(D1, D2, D3);
impl_dependencies_for_tuple!(D1, D2, D3, D4);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5, D6);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5, D6, D7);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5, D6, D7, D8);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5, D6, D7, D8, D9);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11);
impl_dependencies_for_tuple!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12);

/// Declares that instances of `Self` may be served as `I`.
///
/// Every type implements this for itself. Trait-object relationships are
/// declared with [`implements!`](crate::implements).
#[diagnostic::on_unimplemented(
  message = "`{Self}` cannot be bound to `{I}`",
  label = "no conversion from `{Self}` to `{I}` has been declared",
  note = "declare it with `fibre_inject::implements!({I} => {Self})`"
)]
pub trait Implements<I: ?Sized>: Send + Sync + 'static {
  fn upcast(self: Arc<Self>) -> Arc<I>;
}

impl<T: Send + Sync + 'static> Implements<T> for T {
  fn upcast(self: Arc<Self>) -> Arc<T> {
    self
  }
}
