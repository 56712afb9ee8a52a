//! Model descriptors and the discovery walk.
//!
//! [`ModelDescriptor::discover`] walks a model type's members depth-first
//! and registers one [`LeafDescriptor`] per reachable terminal property.
//! The canonical path of a leaf is the dot-joined sequence of ancestor
//! member names followed by its own name, root-relative - the model type's
//! own name is not part of the path. Intermediate steps are recorded as
//! [`AncestorLink`] chains shared between sibling leaves via `Arc`; the
//! value writer later replays a leaf's chain to reach its owning object.
//!
//! The walk keeps an explicit stack of the types currently being traversed:
//! a nested member whose target type is already on that stack cannot be
//! traversed (recursing would not terminate, and treating it as a leaf
//! would be wrong), so it is skipped without emitting anything.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::Result;
use crate::member::{
  AccessError, Bindable, DefaultFn, LeafSetFn, Member, MemberKind, NestedAccess, NestedGetFn, TypeMeta,
};
use crate::options::DuplicatePolicy;
use crate::pass::BindPass;
use crate::resolver::PathResolver;

/// One intermediate property step on the way from the model root to a leaf.
pub struct AncestorLink {
  name: &'static str,
  value_type: TypeMeta,
  get_mut: NestedGetFn,
  parent: Option<Arc<AncestorLink>>,
}

impl AncestorLink {
  fn new(
    name: &'static str,
    value_type: TypeMeta,
    get_mut: NestedGetFn,
    parent: Option<Arc<AncestorLink>>,
  ) -> Self {
    Self {
      name,
      value_type,
      get_mut,
      parent,
    }
  }

  /// Simple name of the intermediate member.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// The traversed target type (the `T` of an `Option<T>` field).
  pub fn value_type(&self) -> TypeMeta {
    self.value_type
  }

  /// The next intermediate toward the root, if any.
  pub fn parent(&self) -> Option<&Arc<AncestorLink>> {
    self.parent.as_ref()
  }

  /// Dotted path from the model root to this intermediate.
  pub fn path(&self) -> String {
    let mut names = vec![self.name];
    let mut current = self.parent.as_deref();
    while let Some(link) = current {
      names.push(link.name);
      current = link.parent.as_deref();
    }
    names.reverse();
    names.join(".")
  }

  /// Borrow the nested object behind this step on `owner`.
  pub(crate) fn follow<'a>(&self, owner: &'a mut dyn Any) -> NestedAccess<'a> {
    (self.get_mut)(owner)
  }
}

impl fmt::Debug for AncestorLink {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AncestorLink")
      .field("path", &self.path())
      .field("value_type", &self.value_type.name)
      .finish()
  }
}

/// Descriptor of one terminal, writable property reachable from the root.
///
/// Created only by the discovery walk; read-only afterwards. Descriptors
/// live as long as their owning [`ModelDescriptor`] - for cached models,
/// the life of the process.
pub struct LeafDescriptor {
  name: &'static str,
  value_type: TypeMeta,
  model: TypeMeta,
  path: String,
  index: usize,
  parent: Option<Arc<AncestorLink>>,
  set: LeafSetFn,
  default: DefaultFn,
}

impl LeafDescriptor {
  pub(crate) fn new(
    name: &'static str,
    value_type: TypeMeta,
    model: TypeMeta,
    parent: Option<Arc<AncestorLink>>,
    set: LeafSetFn,
    default: DefaultFn,
    index: usize,
  ) -> Self {
    let path = match parent.as_deref() {
      Some(link) => format!("{}.{}", link.path(), name),
      None => name.to_string(),
    };

    Self {
      name,
      value_type,
      model,
      path,
      index,
      parent,
      set,
      default,
    }
  }

  /// Simple property name.
  pub fn name(&self) -> &'static str {
    self.name
  }

  /// Declared value type of the property.
  pub fn value_type(&self) -> TypeMeta {
    self.value_type
  }

  /// The model type this leaf was discovered on.
  pub fn model(&self) -> TypeMeta {
    self.model
  }

  /// Canonical dotted path, root-relative.
  pub fn path(&self) -> &str {
    &self.path
  }

  /// Discovery-order index within the owning resolver.
  pub fn index(&self) -> usize {
    self.index
  }

  /// The leaf's immediate parent intermediate, absent for root-level leaves.
  pub fn parent(&self) -> Option<&Arc<AncestorLink>> {
    self.parent.as_ref()
  }

  /// The property's default value.
  pub fn default_value(&self) -> Box<dyn Any> {
    (self.default)()
  }

  /// Intermediate steps from the root down to the leaf's owning object.
  pub(crate) fn chain_from_root(&self) -> Vec<&AncestorLink> {
    let mut links = Vec::new();
    let mut current = self.parent.as_deref();
    while let Some(link) = current {
      links.push(link);
      current = link.parent.as_deref();
    }
    links.reverse();
    links
  }

  /// Write `value` into the leaf on its immediate owning object.
  pub(crate) fn set_value(
    &self,
    owner: &mut dyn Any,
    value: Box<dyn Any>,
  ) -> std::result::Result<(), AccessError> {
    (self.set)(owner, value)
  }
}

impl fmt::Debug for LeafDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LeafDescriptor")
      .field("path", &self.path)
      .field("value_type", &self.value_type.name)
      .field("index", &self.index)
      .finish()
  }
}

impl fmt::Display for LeafDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.value_type.name, self.path)
  }
}

/// Per-model-type façade over the discovery results.
///
/// Immutable once constructed. Normally obtained through a
/// [`ModelCache`](crate::cache::ModelCache) rather than built directly, so
/// the discovery cost is paid once per model type.
#[derive(Debug)]
pub struct ModelDescriptor {
  model: TypeMeta,
  resolver: PathResolver,
}

impl ModelDescriptor {
  /// Run the discovery walk for `M`.
  ///
  /// # Errors
  ///
  /// Returns [`DuplicateModelPath`](crate::BindError::DuplicateModelPath)
  /// if two leaves produce the same canonical path and `policy` is
  /// [`DuplicatePolicy::Reject`].
  pub fn discover<M: Bindable>(policy: DuplicatePolicy) -> Result<Self> {
    let model = TypeMeta::of::<M>();
    let mut resolver = PathResolver::new(model);
    let mut visiting = vec![model.id];

    walk(M::members(), None, &mut visiting, &mut resolver, policy)?;

    debug!(model = model.name, leaves = resolver.len(), "model discovery complete");

    Ok(Self { model, resolver })
  }

  /// The model type this descriptor was built for.
  pub fn model(&self) -> TypeMeta {
    self.model
  }

  /// The registry of discovered leaves.
  pub fn resolver(&self) -> &PathResolver {
    &self.resolver
  }

  /// Start a bind pass with its own bound-flag state.
  pub fn begin_pass(&self) -> BindPass<'_> {
    BindPass::new(&self.resolver)
  }
}

impl fmt::Display for ModelDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.model.name)
  }
}

/// Depth-first walk over one type's members, accumulating ancestor chains.
fn walk(
  members: Vec<Member>,
  parent: Option<Arc<AncestorLink>>,
  visiting: &mut Vec<TypeId>,
  resolver: &mut PathResolver,
  policy: DuplicatePolicy,
) -> Result<()> {
  for member in members {
    match member.kind {
      MemberKind::Leaf { set, default } => {
        resolver.register(member.name, member.value_type, parent.clone(), set, default, policy)?;
      }
      MemberKind::Nested { members: nested_members, get_mut } => {
        if visiting.contains(&member.value_type.id) {
          trace!(
            member = member.name,
            target = member.value_type.name,
            "skipping recursive member"
          );
          continue;
        }

        let link = Arc::new(AncestorLink::new(
          member.name,
          member.value_type,
          get_mut,
          parent.clone(),
        ));

        visiting.push(member.value_type.id);
        walk(nested_members(), Some(link), visiting, resolver, policy)?;
        visiting.pop();
      }
    }
  }

  Ok(())
}
