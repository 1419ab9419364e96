//! Per-container settings.

use crate::provider::Scope;

/// Behavioural settings of a [`Container`](crate::Container).
///
/// Only the container itself is configured here; bindings are always made in
/// code. With the `serde` feature enabled the config can be deserialized, e.g.
/// from the settings section of an application config file:
///
/// ```json
/// { "label": "request", "default_scope": "singleton" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ContainerConfig {
  /// Name attached to the container's log events.
  pub label: Option<String>,
  /// Scope given to new bindings until changed through their configurator.
  pub default_scope: Scope,
}

impl ContainerConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = Some(label.into());
    self
  }

  pub fn with_default_scope(mut self, scope: Scope) -> Self {
    self.default_scope = scope;
    self
  }

  pub(crate) fn label(&self) -> &str {
    self.label.as_deref().unwrap_or("unlabeled")
  }
}
