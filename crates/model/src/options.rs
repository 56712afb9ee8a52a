//! Binding policy configuration.
//!
//! Both policies default to their strict variant; the permissive variants
//! exist for backward compatibility with flat addressing schemes and must be
//! opted into explicitly. The types derive serde so hosts can carry binding
//! policy in their configuration files.

use serde::{Deserialize, Serialize};

/// What to do when discovery registers two leaves with the same path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
  /// Fail discovery with [`DuplicateModelPath`](crate::BindError::DuplicateModelPath).
  #[default]
  Reject,

  /// Drop the duplicate and keep the first registration.
  FirstWins,
}

/// What to do when a (name, type) lookup matches more than one leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
  /// Fail the lookup with [`AmbiguousNameLookup`](crate::BindError::AmbiguousNameLookup).
  #[default]
  Reject,

  /// Return the first-discovered match. Deterministic, but silently ignores
  /// the remaining matches.
  FirstMatch,
}

/// Bundle of binding policies, suitable for host configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BindOptions {
  /// Duplicate-path handling during discovery.
  pub duplicate_paths: DuplicatePolicy,

  /// Ambiguity handling for (name, type) lookups.
  pub ambiguous_matches: AmbiguityPolicy,
}
