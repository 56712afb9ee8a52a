//! Finalized value sets handed over by the parsing layer.
//!
//! A [`ValueSet`] is the boundary contract with the external command
//! surface: a mapping from an addressing key to a value the parser has
//! already validated and converted to the leaf's declared type. Keys are
//! either canonical paths or legacy (name, type) pairs, depending on how
//! the target was declared when the command surface was built.

use std::any::{Any, TypeId};
use std::fmt;

/// How one entry addresses its target leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKey {
  /// Canonical dotted path, root-relative.
  Path(String),

  /// Flat (simple name, declared type) pair, ignoring nesting.
  Name { name: String, value_type: TypeId },
}

impl ValueKey {
  /// The string the entry was declared under, used for deterministic
  /// ordering of a bind pass.
  pub fn declared(&self) -> &str {
    match self {
      ValueKey::Path(path) => path,
      ValueKey::Name { name, .. } => name,
    }
  }
}

/// One invocation's worth of already-typed values.
#[derive(Default)]
pub struct ValueSet {
  entries: Vec<(ValueKey, Box<dyn Any>)>,
}

impl ValueSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a value addressed by canonical path.
  pub fn with_path(mut self, path: impl Into<String>, value: impl Any) -> Self {
    self.entries.push((ValueKey::Path(path.into()), Box::new(value)));
    self
  }

  /// Add a value addressed by the legacy (name, type) pair. The declared
  /// type is taken from the value itself - the parsing layer has already
  /// converted it.
  pub fn with_named<T: Any>(mut self, name: impl Into<String>, value: T) -> Self {
    self.entries.push((
      ValueKey::Name {
        name: name.into(),
        value_type: TypeId::of::<T>(),
      },
      Box::new(value),
    ));
    self
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Entries sorted by declared key, the order a bind pass applies them in.
  pub(crate) fn into_sorted(self) -> Vec<(ValueKey, Box<dyn Any>)> {
    let mut entries = self.entries;
    entries.sort_by(|a, b| a.0.declared().cmp(b.0.declared()));
    entries
  }
}

impl fmt::Debug for ValueSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.entries.iter().map(|(key, _)| key)).finish()
  }
}
