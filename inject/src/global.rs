//! The global container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access, thread-safe.
static GLOBAL_CONTAINER: Lazy<Container<'static>> = Lazy::new(Container::new);

/// Provides a reference to the global root container.
///
/// Useful for applications with a single composition root. Child containers
/// may borrow it like any other container.
///
/// # Examples
///
/// ```
/// use fibre_inject::{global, Injectable};
///
/// struct Settings;
/// impl Injectable for Settings {
///   type Dependencies = ();
///   fn inject(_: ()) -> Self {
///     Settings
///   }
/// }
///
/// global().bind::<Settings>().to_self().as_singleton();
/// assert!(global().get::<Settings>().is_ok());
/// ```
pub fn global() -> &'static Container<'static> {
  &GLOBAL_CONTAINER
}
