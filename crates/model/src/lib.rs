//! pathbind-model: property-path descriptor engine
//!
//! This crate discovers the writable leaf properties of a model type,
//! addresses them through canonical dotted paths, and writes values through
//! nested object chains without the model implementing anything beyond the
//! [`Bindable`] metadata trait (normally generated by [`bindable!`]):
//!
//! - [`bindable!`]: declares a model struct and generates its metadata
//! - [`ModelDescriptor`]: per-model discovery results, built once per type
//! - [`PathResolver`]: canonical-path registry with three addressing modes
//! - [`Selector`]: compile-time-checked access-path literals
//! - [`BindPass`]: per-bind bound-flag tracking
//! - [`write`]: chain-replaying value writer
//! - [`ModelCache`] / [`model_descriptor`]: memoized descriptor caches

pub mod cache;
pub mod descriptor;
pub mod error;
pub mod macros;
pub mod member;
pub mod options;
pub mod pass;
pub mod resolver;
pub mod selector;
pub mod writer;

#[cfg(test)]
mod testutil;

pub use cache::{ModelCache, model_descriptor};
pub use descriptor::{AncestorLink, LeafDescriptor, ModelDescriptor};
pub use error::{BindError, Result};
pub use member::{AccessError, Bindable, Member, MemberKind, NestedAccess, TypeMeta};
pub use options::{AmbiguityPolicy, BindOptions, DuplicatePolicy};
pub use pass::BindPass;
pub use resolver::PathResolver;
pub use selector::Selector;
pub use writer::write;
