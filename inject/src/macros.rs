//! Public macros for declaring implementations and resolving services.

/// Declares that one or more implementation types can be served as an abstraction.
///
/// Generates an [`Implements`](crate::Implements) impl per type. The body is a
/// plain unsized coercion, so a type that does not actually implement the
/// trait fails to compile.
///
/// # Examples
///
/// ```
/// use fibre_inject::implements;
///
/// trait Runner: Send + Sync {}
/// struct Cheetah;
/// struct Greyhound;
/// impl Runner for Cheetah {}
/// impl Runner for Greyhound {}
///
/// implements!(dyn Runner => Cheetah, Greyhound);
/// ```
#[macro_export]
macro_rules! implements {
  ($interface:ty => $($implementation:ty),+ $(,)?) => {
    $(
      impl $crate::Implements<$interface> for $implementation {
        fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$interface> {
          self
        }
      }
    )+
  };
}

/// Resolves a service, panicking if it cannot be resolved.
///
/// `resolve!(T)` uses the [global](crate::global) container; `resolve!(T, container)`
/// uses the given one. For a non-panicking version, call `get` directly.
///
/// # Panics
///
/// Panics with the resolution error if the service is not bound or its
/// dependency graph contains a cycle.
///
/// # Examples
///
/// ```
/// use fibre_inject::{resolve, Container, Injectable};
///
/// struct Clock;
/// impl Injectable for Clock {
///   type Dependencies = ();
///   fn inject(_: ()) -> Self {
///     Clock
///   }
/// }
///
/// let container = Container::new();
/// container.bind::<Clock>().to_self();
/// let _clock = resolve!(Clock, container);
/// ```
#[macro_export]
macro_rules! resolve {
  ($type:ty) => {
    $crate::global().get::<$type>().unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {}: {}",
        ::std::any::type_name::<$type>(),
        err
      )
    })
  };

  ($type:ty, $container:expr) => {
    $container.get::<$type>().unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {}: {}",
        ::std::any::type_name::<$type>(),
        err
      )
    })
  };
}
