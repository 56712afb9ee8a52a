//! Error types for pathbind-model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by discovery, lookup, and write operations.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BindError {
  /// Two leaves produced the same canonical path during discovery.
  #[error("duplicate model path '{path}' in model {model}")]
  DuplicateModelPath { model: String, path: String },

  /// A (name, type) lookup matched more than one leaf without opt-in.
  #[error("{count} properties named '{name}' share type {type_name}")]
  AmbiguousNameLookup {
    name: String,
    type_name: String,
    count: usize,
  },

  /// No leaf is registered at the requested path.
  #[error("no bindable property at path '{path}'")]
  PathNotFound { path: String },

  /// A typed selector's result type disagrees with the stored leaf type.
  #[error("selector for '{path}' yields {requested}, model declares {declared}")]
  SelectorTypeMismatch {
    path: String,
    declared: String,
    requested: String,
  },

  /// A write ran into an unset intermediate object.
  #[error("intermediate '{intermediate}' is unset while writing '{path}'")]
  UnsetIntermediate { path: String, intermediate: String },

  /// The supplied value is not of the leaf's declared type.
  #[error("value for '{path}' is not a {expected}")]
  ValueTypeMismatch { path: String, expected: String },

  /// The root instance (or selector root) is not the resolver's model type.
  #[error("instance is not of model type {model}")]
  InstanceTypeMismatch { model: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, BindError>;
