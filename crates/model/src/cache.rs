//! Memoized model-descriptor caches.
//!
//! [`ModelCache`] is an explicit, independently constructible registry of
//! model descriptors keyed by type identity. Get-or-create is atomic: the
//! cache lock is held for the duration of the discovery walk, so concurrent
//! first access runs the walk at most once per model type. Discovery
//! failures are not cached - there is no partial registry, and the next
//! caller triggers (and fails) discovery again.
//!
//! [`model_descriptor`] is the process-wide cache most hosts want; explicit
//! caches exist so tests and embedders can hold independent registries with
//! their own duplicate-path policy.

use std::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::descriptor::ModelDescriptor;
use crate::error::Result;
use crate::member::Bindable;
use crate::options::{BindOptions, DuplicatePolicy};

/// A registry of model descriptors, one per model type, never evicted.
pub struct ModelCache {
  policy: DuplicatePolicy,
  inner: Mutex<HashMap<TypeId, Arc<ModelDescriptor>>>,
}

impl ModelCache {
  /// A cache with the strict duplicate-path policy.
  pub fn new() -> Self {
    Self::with_policy(DuplicatePolicy::Reject)
  }

  /// A cache that applies `policy` to every discovery it runs.
  pub fn with_policy(policy: DuplicatePolicy) -> Self {
    Self {
      policy,
      inner: Mutex::new(HashMap::new()),
    }
  }

  /// A cache configured from a host options bundle.
  pub fn with_options(options: &BindOptions) -> Self {
    Self::with_policy(options.duplicate_paths)
  }

  /// Get the descriptor for `M`, running discovery on first access.
  pub fn descriptor<M: Bindable>(&self) -> Result<Arc<ModelDescriptor>> {
    let mut cached = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

    match cached.entry(TypeId::of::<M>()) {
      Entry::Occupied(slot) => Ok(Arc::clone(slot.get())),
      Entry::Vacant(slot) => {
        let descriptor = Arc::new(ModelDescriptor::discover::<M>(self.policy)?);
        debug!(model = %descriptor, "caching model descriptor");
        Ok(Arc::clone(slot.insert(descriptor)))
      }
    }
  }

  /// Whether a descriptor for `M` has been built already.
  pub fn contains<M: Bindable>(&self) -> bool {
    self
      .inner
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .contains_key(&TypeId::of::<M>())
  }

  /// Number of cached model types.
  pub fn len(&self) -> usize {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for ModelCache {
  fn default() -> Self {
    Self::new()
  }
}

static PROCESS_CACHE: OnceLock<ModelCache> = OnceLock::new();

/// Get the descriptor for `M` from the process-wide cache.
///
/// The process cache uses the strict duplicate-path policy and lives until
/// process exit. Hosts that need a permissive policy or an independent
/// lifetime construct their own [`ModelCache`].
pub fn model_descriptor<M: Bindable>() -> Result<Arc<ModelDescriptor>> {
  PROCESS_CACHE.get_or_init(ModelCache::new).descriptor::<M>()
}
