//! Shared data structures: arenas, index types, and fast hash maps.

pub mod arena;
pub mod index;
pub mod map;

pub use arena::IndexArena;
pub use index::{AstId, DeclId, ExprId, Idx, SourceLocId, TokDataId, TokTypeId, TypeInfoId};
pub use map::{FxHashMap, FxHashSet, FxIndexMap};
