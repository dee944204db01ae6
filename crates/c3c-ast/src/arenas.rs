//! The seven independent bump arenas, bundled into one pool.

use crate::{
    ast::{Ast, Decl, Expr, TypeInfo},
    token::{Span, TokenKind},
};
use c3c_data_structures::{
    index::{AstId, DeclId, ExprId, SourceLocId, TokDataId, TokTypeId, TypeInfoId},
    IndexArena,
};
use c3c_interface::FileId;

/// A source location, stored by index so AST nodes can reference their
/// origin without an owning pointer.
#[derive(Clone, Copy, Debug)]
pub struct SourceLocEntry {
    pub file: FileId,
    pub span: Span,
}

/// One entry of the token-type stream.
#[derive(Clone, Debug)]
pub struct TokTypeEntry(pub TokenKind);

/// One entry of the token-data stream (the text backing a token, when it
/// carries one).
#[derive(Clone, Debug, Default)]
pub struct TokDataEntry(pub String);

/// The seven arenas: AST nodes, expressions, declarations, type-info,
/// source locations, token types, and token data.
#[derive(Default)]
pub struct ArenaPool {
    pub ast: IndexArena<Ast, AstId>,
    pub expr: IndexArena<Expr, ExprId>,
    pub decl: IndexArena<Decl, DeclId>,
    pub type_info: IndexArena<TypeInfo, TypeInfoId>,
    pub source_loc: IndexArena<SourceLocEntry, SourceLocId>,
    pub tok_type: IndexArena<TokTypeEntry, TokTypeId>,
    pub tok_data: IndexArena<TokDataEntry, TokDataId>,
}

/// Per-arena allocation counters, printed at the end of a compile.
#[derive(Debug, Clone, Copy)]
pub struct ArenaStats {
    pub ast_bytes: usize,
    pub expr_bytes: usize,
    pub decl_bytes: usize,
    pub type_info_bytes: usize,
    pub source_loc_bytes: usize,
    pub tok_type_bytes: usize,
    pub tok_data_bytes: usize,
}

impl ArenaPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            ast_bytes: self.ast.allocated_bytes(),
            expr_bytes: self.expr.allocated_bytes(),
            decl_bytes: self.decl.allocated_bytes(),
            type_info_bytes: self.type_info.allocated_bytes(),
            source_loc_bytes: self.source_loc.allocated_bytes(),
            tok_type_bytes: self.tok_type.allocated_bytes(),
            tok_data_bytes: self.tok_data.allocated_bytes(),
        }
    }

    /// Frees the AST-family arenas (AST, expr, decl, type-info, source-loc,
    /// token streams) after code generation has copied out whatever it
    /// needs from them.
    pub fn free_ast_arenas(&mut self) {
        self.ast.free_all();
        self.expr.free_all();
        self.decl.free_all();
        self.type_info.free_all();
        self.source_loc.free_all();
        self.tok_type.free_all();
        self.tok_data.free_all();
    }
}
