//! Process-stable identity values for the types a container deals with.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a type, as used for binding lookup and cycle detection.
///
/// Equality and hashing use the underlying [`TypeId`] only. The display name is
/// diagnostic metadata: two keys for the same type compare equal even when they
/// carry different names.
#[derive(Clone, Copy)]
pub struct TypeKey {
  id: TypeId,
  name: &'static str,
}

/// Anchor pushed at the bottom of every injection context. Private, so it can
/// never be bound or requested.
struct ResolutionRoot;

impl TypeKey {
  /// The key for `T`, named after the compiler-generated type name.
  pub fn of<T: ?Sized + 'static>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  /// The key for `T` with a custom display name.
  pub fn with_name<T: ?Sized + 'static>(name: &'static str) -> Self {
    Self {
      id: TypeId::of::<T>(),
      name,
    }
  }

  pub(crate) fn root() -> Self {
    Self::with_name::<ResolutionRoot>("<root>")
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn type_id(&self) -> TypeId {
    self.id
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeKey({})", self.name)
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  trait Runner {}
  struct Cheetah;

  #[test]
  fn display_name_does_not_affect_equality() {
    let plain = TypeKey::of::<Cheetah>();
    let named = TypeKey::with_name::<Cheetah>("FastCat");

    assert_eq!(plain, named);
    assert_eq!(named.name(), "FastCat");
    assert!(plain.name().ends_with("Cheetah"));

    let mut set = HashSet::new();
    set.insert(plain);
    assert!(set.contains(&named));
  }

  #[test]
  fn distinct_types_have_distinct_keys() {
    assert_ne!(TypeKey::of::<Cheetah>(), TypeKey::of::<dyn Runner>());
    assert_ne!(TypeKey::of::<Cheetah>(), TypeKey::root());
  }
}
