//! pathbind-binder: bind orchestration for pathbind models
//!
//! This crate sits at the boundary between the descriptor engine and an
//! external command surface: the parsing layer produces a [`ValueSet`] of
//! already-typed values keyed by canonical path or legacy (name, type)
//! pair, and [`ObjectBinder`] applies it to a caller-owned target instance.

pub mod binder;
pub mod values;

pub use binder::{BindSummary, ObjectBinder};
pub use values::{ValueKey, ValueSet};

// Re-export the model-layer surface callers need alongside the binder.
pub use pathbind_model::{AmbiguityPolicy, BindError, DuplicatePolicy, ModelCache, Result, bindable};
