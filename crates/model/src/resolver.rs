//! Canonical-path registry for one model type.
//!
//! The resolver owns the complete, order-preserving set of leaf descriptors
//! discovered for a model and answers the three addressing modes:
//!
//! - [`by_path`](PathResolver::by_path) - ordinal exact match against the
//!   stored canonical path;
//! - [`by_name_and_type`](PathResolver::by_name_and_type) - the flat
//!   (name, type) scheme that predates path addressing, ambiguous on
//!   non-trivial models and governed by an [`AmbiguityPolicy`];
//! - [`by_selector`](PathResolver::by_selector) - reconstructs the dotted
//!   path from a typed [`Selector`] and verifies the stored leaf type
//!   against the selector's static target type.
//!
//! All three modes resolve into the same descriptor set. Bound-flag
//! bookkeeping lives in [`BindPass`](crate::pass::BindPass), not here, so a
//! populated resolver is safely shared between concurrent binds.

use std::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::descriptor::{AncestorLink, LeafDescriptor};
use crate::error::{BindError, Result};
use crate::member::{DefaultFn, LeafSetFn, TypeMeta};
use crate::options::{AmbiguityPolicy, DuplicatePolicy};
use crate::selector::Selector;

/// Registry of the leaf descriptors of one model type, keyed by canonical
/// path.
pub struct PathResolver {
  model: TypeMeta,
  descriptors: Vec<Arc<LeafDescriptor>>,
  by_path: HashMap<String, usize>,
}

impl PathResolver {
  pub(crate) fn new(model: TypeMeta) -> Self {
    Self {
      model,
      descriptors: Vec::new(),
      by_path: HashMap::new(),
    }
  }

  /// The model type this resolver was built for.
  pub fn model(&self) -> TypeMeta {
    self.model
  }

  /// Number of registered leaves.
  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }

  /// Registered descriptors, in discovery order.
  pub fn descriptors(&self) -> impl Iterator<Item = &Arc<LeafDescriptor>> {
    self.descriptors.iter()
  }

  /// Register a newly discovered leaf.
  ///
  /// A canonical-path collision fails with `DuplicateModelPath` under
  /// [`DuplicatePolicy::Reject`]; under [`DuplicatePolicy::FirstWins`] the
  /// new leaf is dropped and the first registration stays authoritative.
  pub(crate) fn register(
    &mut self,
    name: &'static str,
    value_type: TypeMeta,
    parent: Option<Arc<AncestorLink>>,
    set: LeafSetFn,
    default: DefaultFn,
    policy: DuplicatePolicy,
  ) -> Result<()> {
    let index = self.descriptors.len();
    let descriptor = LeafDescriptor::new(name, value_type, self.model, parent, set, default, index);

    match self.by_path.entry(descriptor.path().to_string()) {
      Entry::Occupied(_) => match policy {
        DuplicatePolicy::Reject => Err(BindError::DuplicateModelPath {
          model: self.model.name.to_string(),
          path: descriptor.path().to_string(),
        }),
        DuplicatePolicy::FirstWins => {
          warn!(model = self.model.name, path = descriptor.path(), "dropping duplicate model path");
          Ok(())
        }
      },
      Entry::Vacant(slot) => {
        slot.insert(index);
        self.descriptors.push(Arc::new(descriptor));
        Ok(())
      }
    }
  }

  /// Look up a leaf by its canonical path (ordinal exact match).
  pub fn by_path(&self, path: &str) -> Option<&Arc<LeafDescriptor>> {
    self.by_path.get(path).map(|&index| &self.descriptors[index])
  }

  /// Look up a leaf by simple name and declared type, ignoring nesting.
  ///
  /// Scans descriptors in discovery order. With more than one match the
  /// lookup fails under [`AmbiguityPolicy::Reject`]; under
  /// [`AmbiguityPolicy::FirstMatch`] the first-discovered match is returned.
  pub fn by_name_and_type(
    &self,
    name: &str,
    value_type: TypeId,
    policy: AmbiguityPolicy,
  ) -> Result<Option<&Arc<LeafDescriptor>>> {
    let mut matches = self
      .descriptors
      .iter()
      .filter(|d| d.name() == name && d.value_type().id == value_type);

    let Some(first) = matches.next() else {
      return Ok(None);
    };

    let extra = matches.count();
    if extra == 0 {
      return Ok(Some(first));
    }

    match policy {
      AmbiguityPolicy::Reject => Err(BindError::AmbiguousNameLookup {
        name: name.to_string(),
        type_name: first.value_type().name.to_string(),
        count: extra + 1,
      }),
      AmbiguityPolicy::FirstMatch => Ok(Some(first)),
    }
  }

  /// Resolve a typed selector to the leaf it denotes.
  ///
  /// The selector's segments are joined into a canonical path and resolved
  /// by exact match; the stored leaf type must equal the selector's static
  /// target type. A mismatch means the model shape changed underneath a
  /// compiled access chain and fails with `SelectorTypeMismatch`.
  pub fn by_selector<M: 'static, T: 'static>(
    &self,
    selector: &Selector<M, T>,
  ) -> Result<&Arc<LeafDescriptor>> {
    if TypeId::of::<M>() != self.model.id {
      return Err(BindError::InstanceTypeMismatch {
        model: self.model.name.to_string(),
      });
    }

    let path = selector.path();
    let descriptor = self
      .by_path(&path)
      .ok_or_else(|| BindError::PathNotFound { path: path.clone() })?;

    let requested = selector.value_type();
    if descriptor.value_type().id != requested.id {
      return Err(BindError::SelectorTypeMismatch {
        path,
        declared: descriptor.value_type().name.to_string(),
        requested: requested.name.to_string(),
      });
    }

    Ok(descriptor)
  }
}

impl fmt::Debug for PathResolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PathResolver")
      .field("model", &self.model.name)
      .field("leaves", &self.descriptors.len())
      .finish()
  }
}
