//! Dense, arena-stable index types.
//!
//! Every indexed arena reserves index `0` as the "none" sentinel: the first
//! allocation performed against a fresh arena is a throwaway placeholder so
//! that a real item is never found at index `0`.

pub use index_vec::{Idx, IndexVec};

/// Declares a 32-bit index newtype backed by [`index_vec`].
#[macro_export]
macro_rules! arena_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        index_vec::define_index_type! {
            $(#[$attr])*
            $vis struct $name = u32;
            DISPLAY_FORMAT = "{}";
        }
    };
}

arena_index! {
    /// Index into the AST-node arena.
    pub struct AstId;
}
arena_index! {
    /// Index into the expression arena.
    pub struct ExprId;
}
arena_index! {
    /// Index into the declaration arena.
    pub struct DeclId;
}
arena_index! {
    /// Index into the type-info arena.
    pub struct TypeInfoId;
}
arena_index! {
    /// Index into the source-location arena.
    pub struct SourceLocId;
}
arena_index! {
    /// Index into the token-type stream arena.
    pub struct TokTypeId;
}
arena_index! {
    /// Index into the token-data stream arena.
    pub struct TokDataId;
}
