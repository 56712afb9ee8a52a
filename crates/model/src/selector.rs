//! Typed property selectors.
//!
//! A [`Selector`] is a compile-time-checked access-path literal: it records
//! the segment names of a property chain while carrying the root model type
//! and the target type as type parameters. Selectors for individual fields
//! are generated by [`bindable!`](crate::bindable); deeper paths are built
//! with [`Selector::then`], which only accepts a continuation rooted at the
//! current target type - a chain that does not exist on the model shape
//! fails to compile.
//!
//! ```
//! use pathbind_model::bindable;
//!
//! bindable! {
//!   #[derive(Debug, Default)]
//!   pub struct Inner {
//!     pub detail: String,
//!   }
//! }
//!
//! bindable! {
//!   #[derive(Debug, Default)]
//!   pub struct Outer {
//!     #[nested] pub inner: Option<Inner>,
//!   }
//! }
//!
//! let selector = Outer::inner().then(Inner::detail());
//! assert_eq!(selector.path(), "inner.detail");
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::member::TypeMeta;

/// A statically typed chain of property accesses from model `M` to a value
/// of type `T`.
pub struct Selector<M, T> {
  segments: Vec<&'static str>,
  _types: PhantomData<fn(&M) -> &T>,
}

impl<M: 'static, T: 'static> Selector<M, T> {
  /// A single-segment selector for a direct member of `M`.
  pub fn head(segment: &'static str) -> Self {
    Self {
      segments: vec![segment],
      _types: PhantomData,
    }
  }

  /// Extend this selector with a continuation rooted at its target type.
  pub fn then<U: 'static>(mut self, tail: Selector<T, U>) -> Selector<M, U> {
    self.segments.extend(tail.segments);
    Selector {
      segments: self.segments,
      _types: PhantomData,
    }
  }

  /// The dotted path this selector denotes, root-relative.
  pub fn path(&self) -> String {
    self.segments.join(".")
  }

  /// The recorded segment names.
  pub fn segments(&self) -> &[&'static str] {
    &self.segments
  }

  /// The selector's static target type.
  pub fn value_type(&self) -> TypeMeta {
    TypeMeta::of::<T>()
  }
}

impl<M, T> Clone for Selector<M, T> {
  fn clone(&self) -> Self {
    Self {
      segments: self.segments.clone(),
      _types: PhantomData,
    }
  }
}

impl<M, T> fmt::Debug for Selector<M, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Selector").field(&self.segments.join(".")).finish()
  }
}
