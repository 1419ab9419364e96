//! Error types for resolution.

use thiserror::Error;

/// Errors raised while resolving a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// No binding for the requested type in the container or any of its ancestors.
  #[error("component for interface '{type_name}' not found")]
  ComponentNotFound { type_name: &'static str },

  /// The implementation is already being constructed further up the current
  /// resolution path. `chain` lists that path, ending with the repeated type.
  #[error("found circular dependency on object '{type_name}' ({chain})")]
  CircularDependency {
    type_name: &'static str,
    chain: String,
  },

  /// A closure factory reported that it could not produce its instance.
  #[error("factory for '{type_name}' failed: {message}")]
  FactoryFailed {
    type_name: &'static str,
    message: String,
  },
}

impl ResolveError {
  /// Creates a [`ResolveError::FactoryFailed`] for the implementation type `T`.
  pub fn factory_failed<T: ?Sized + 'static>(message: impl Into<String>) -> Self {
    Self::FactoryFailed {
      type_name: std::any::type_name::<T>(),
      message: message.into(),
    }
  }

  /// The diagnostic name of the type the error is about.
  pub fn type_name(&self) -> &'static str {
    match self {
      Self::ComponentNotFound { type_name }
      | Self::CircularDependency { type_name, .. }
      | Self::FactoryFailed { type_name, .. } => type_name,
    }
  }
}

/// A specialized `Result` type for resolution.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
