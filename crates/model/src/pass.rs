//! Per-bind-pass resolution and bound tracking.
//!
//! A [`BindPass`] scopes the "bound" flag to a single bind: lookups made
//! through the pass mark the resolved descriptor bound, and
//! [`bound_descriptors`](BindPass::bound_descriptors) enumerates exactly the
//! leaves addressed so far, in discovery order. The set is populated
//! incrementally by lookups - binding a handful of properties out of a
//! large model never touches the unrelated leaves.
//!
//! Each concurrent bind takes its own pass; the underlying resolver is only
//! ever read. Unlike the raw resolver lookups, a miss here is an error -
//! a pass resolves targets it is about to write.

use std::any::TypeId;
use std::sync::Arc;

use crate::descriptor::LeafDescriptor;
use crate::error::{BindError, Result};
use crate::options::AmbiguityPolicy;
use crate::resolver::PathResolver;
use crate::selector::Selector;

/// Bound-flag state for one bind pass over a shared resolver.
#[derive(Debug)]
pub struct BindPass<'r> {
  resolver: &'r PathResolver,
  bound: Vec<bool>,
}

impl<'r> BindPass<'r> {
  pub(crate) fn new(resolver: &'r PathResolver) -> Self {
    Self {
      resolver,
      bound: vec![false; resolver.len()],
    }
  }

  /// The resolver this pass runs against.
  pub fn resolver(&self) -> &'r PathResolver {
    self.resolver
  }

  /// Resolve by canonical path and mark the descriptor bound.
  pub fn resolve_by_path(&mut self, path: &str) -> Result<&'r Arc<LeafDescriptor>> {
    let resolver = self.resolver;
    let descriptor = resolver
      .by_path(path)
      .ok_or_else(|| BindError::PathNotFound { path: path.to_string() })?;

    self.bound[descriptor.index()] = true;
    Ok(descriptor)
  }

  /// Resolve by (simple name, declared type) and mark the descriptor bound.
  ///
  /// A miss is reported as [`PathNotFound`](BindError::PathNotFound)
  /// carrying the simple name.
  pub fn resolve_by_name_and_type(
    &mut self,
    name: &str,
    value_type: TypeId,
    policy: AmbiguityPolicy,
  ) -> Result<&'r Arc<LeafDescriptor>> {
    let resolver = self.resolver;
    let descriptor = resolver
      .by_name_and_type(name, value_type, policy)?
      .ok_or_else(|| BindError::PathNotFound { path: name.to_string() })?;

    self.bound[descriptor.index()] = true;
    Ok(descriptor)
  }

  /// Resolve a typed selector and mark the descriptor bound.
  pub fn resolve_by_selector<M: 'static, T: 'static>(
    &mut self,
    selector: &Selector<M, T>,
  ) -> Result<&'r Arc<LeafDescriptor>> {
    let resolver = self.resolver;
    let descriptor = resolver.by_selector(selector)?;
    self.bound[descriptor.index()] = true;
    Ok(descriptor)
  }

  /// Whether `descriptor` has been resolved during this pass.
  pub fn is_bound(&self, descriptor: &LeafDescriptor) -> bool {
    self.bound.get(descriptor.index()).copied().unwrap_or(false)
  }

  /// Descriptors resolved so far, in discovery order.
  pub fn bound_descriptors(&self) -> impl Iterator<Item = &'r Arc<LeafDescriptor>> + '_ {
    let resolver = self.resolver;
    resolver.descriptors().filter(|d| self.bound[d.index()])
  }
}
