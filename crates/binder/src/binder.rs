//! Binding orchestration against a live target instance.
//!
//! [`ObjectBinder`] ties a model's cached descriptor to a concrete target:
//! [`update_instance`](ObjectBinder::update_instance) resolves every entry
//! of a [`ValueSet`] and writes it through the model's ancestor chains.
//! Entries are applied in lexical order of their declared key so a partial
//! failure is reproducible; there is no rollback - the model's constructors
//! own instance consistency, the binder owns loud failure.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use pathbind_model::{
  AmbiguityPolicy, Bindable, BindError, LeafDescriptor, ModelCache, ModelDescriptor, Result,
  model_descriptor, write,
};

use crate::values::{ValueKey, ValueSet};

/// Applies finalized value sets to instances of `M`.
pub struct ObjectBinder<M: Bindable> {
  descriptor: Arc<ModelDescriptor>,
  ambiguity: AmbiguityPolicy,
  _model: PhantomData<fn(&M)>,
}

impl<M: Bindable> ObjectBinder<M> {
  /// A binder backed by the process-wide descriptor cache.
  pub fn new() -> Result<Self> {
    Self::with_descriptor(model_descriptor::<M>()?)
  }

  /// A binder backed by an explicit cache.
  pub fn from_cache(cache: &ModelCache) -> Result<Self> {
    Self::with_descriptor(cache.descriptor::<M>()?)
  }

  /// A binder over an already-obtained descriptor.
  pub fn with_descriptor(descriptor: Arc<ModelDescriptor>) -> Result<Self> {
    if descriptor.model().id != std::any::TypeId::of::<M>() {
      return Err(BindError::InstanceTypeMismatch {
        model: descriptor.model().name.to_string(),
      });
    }

    Ok(Self {
      descriptor,
      ambiguity: AmbiguityPolicy::Reject,
      _model: PhantomData,
    })
  }

  /// Opt into first-match resolution for ambiguous (name, type) entries.
  pub fn with_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
    self.ambiguity = policy;
    self
  }

  /// The model descriptor this binder resolves against.
  pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
    &self.descriptor
  }

  /// Resolve and write every entry of `values` into `target`.
  ///
  /// Entries are processed in lexical order of their declared key. The
  /// first resolution or write failure aborts the remainder of the pass;
  /// writes already applied stay applied.
  pub fn update_instance(&self, target: &mut M, values: ValueSet) -> Result<BindSummary> {
    let mut pass = self.descriptor.begin_pass();

    for (key, value) in values.into_sorted() {
      let leaf: &Arc<LeafDescriptor> = match &key {
        ValueKey::Path(path) => pass.resolve_by_path(path)?,
        ValueKey::Name { name, value_type } => {
          pass.resolve_by_name_and_type(name, *value_type, self.ambiguity)?
        }
      };

      debug!(model = %self.descriptor, path = leaf.path(), "applying bound value");
      write(leaf, target, value)?;
    }

    Ok(BindSummary {
      bound_paths: pass.bound_descriptors().map(|d| d.path().to_string()).collect(),
    })
  }
}

/// Outcome of a successful bind pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindSummary {
  /// Canonical paths of the leaves written, in discovery order.
  pub bound_paths: Vec<String>,
}
