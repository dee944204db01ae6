//! Map types used throughout the compiler.

use indexmap::IndexMap;
use std::collections::HashMap;

pub use rustc_hash::{FxBuildHasher, FxHashSet};

/// A [`HashMap`] using [`rustc_hash`]'s `FxHasher`.
pub type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;

/// An [`IndexMap`] using [`rustc_hash`]'s `FxHasher`.
///
/// Preserves insertion order, which keeps diagnostics and debug output
/// deterministic across runs.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
