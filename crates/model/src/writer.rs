//! Chain-replaying value writer.
//!
//! [`write`] applies a value to a leaf on a concrete root instance by
//! replaying the exact ancestor chain recorded at discovery time: each
//! intermediate is read off the previous result starting at the root, and
//! the literal write happens one step short of the leaf, on its owning
//! object. Nothing is allocated along the way and intermediates are never
//! auto-instantiated - an unset intermediate is a hard error, as is a value
//! or instance of the wrong type. No coercion anywhere.

use std::any::Any;

use tracing::trace;

use crate::descriptor::LeafDescriptor;
use crate::error::{BindError, Result};
use crate::member::{AccessError, NestedAccess};

/// Write `value` into the property `descriptor` describes on `root`.
///
/// # Errors
///
/// - [`UnsetIntermediate`](BindError::UnsetIntermediate) if an intermediate
///   along the chain is absent;
/// - [`ValueTypeMismatch`](BindError::ValueTypeMismatch) if `value` is not
///   of the leaf's declared type;
/// - [`InstanceTypeMismatch`](BindError::InstanceTypeMismatch) if `root` is
///   not an instance of the descriptor's model type.
pub fn write(descriptor: &LeafDescriptor, root: &mut dyn Any, value: Box<dyn Any>) -> Result<()> {
  let mut target = root;

  for link in descriptor.chain_from_root() {
    match link.follow(target) {
      NestedAccess::Present(next) => target = next,
      NestedAccess::Absent => {
        return Err(BindError::UnsetIntermediate {
          path: descriptor.path().to_string(),
          intermediate: link.path(),
        });
      }
      NestedAccess::WrongOwner => {
        return Err(BindError::InstanceTypeMismatch {
          model: descriptor.model().name.to_string(),
        });
      }
    }
  }

  trace!(path = descriptor.path(), "writing bound value");

  descriptor.set_value(target, value).map_err(|err| match err {
    AccessError::WrongOwner => BindError::InstanceTypeMismatch {
      model: descriptor.model().name.to_string(),
    },
    AccessError::ValueMismatch => BindError::ValueTypeMismatch {
      path: descriptor.path().to_string(),
      expected: descriptor.value_type().name.to_string(),
    },
  })
}
