//! The tagged-union tree types `Decl`, `Expr`, `Ast` (statements), and
//! `TypeInfo`, addressed by arena index rather than owning pointer.

use c3c_data_structures::{AstId, DeclId, ExprId, TypeInfoId};
use c3c_interface::Symbol;
use smallvec::SmallVec;

/// `{ module_name, source_span, length }`.
#[derive(Clone, Copy, Debug)]
pub struct Path {
    pub module_name: Symbol,
    pub span: crate::token::Span,
    pub length: u32,
}

/// Visibility of a declaration, from most to least visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    Public,
    Module,
    Local,
}

/// Resolution status of a declaration, tracked across the `DECLS` stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveStatus {
    Pending,
    Resolving,
    Done,
    Poisoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Const,
    Local,
    Global,
    Parameter,
}

#[derive(Clone, Debug)]
pub struct VarDecl {
    pub kind: VarKind,
    pub constant: bool,
    pub type_info: Option<TypeInfoId>,
    pub init_expr: Option<ExprId>,
}

#[derive(Clone, Debug)]
pub struct FuncDecl {
    pub return_type: TypeInfoId,
    pub params: SmallVec<[DeclId; 4]>,
    pub body: Option<AstId>,
}

/// `Decl`'s variant payload: var, func, type, macro, enum, struct, or union.
#[derive(Clone, Debug)]
pub enum DeclKind {
    Var(VarDecl),
    Func(FuncDecl),
    Type,
    Macro,
    Enum,
    Struct,
    Union,
}

/// A declaration. Common header fields plus a tagged-union payload.
#[derive(Clone, Debug)]
pub struct Decl {
    pub name: Symbol,
    pub module: Symbol,
    pub visibility: Visibility,
    pub kind: DeclKind,
    pub resolve_status: ResolveStatus,
    pub ty: Option<TypeInfoId>,
    pub external_name: Option<Symbol>,
}

impl Decl {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn is_poisoned(&self) -> bool {
        self.resolve_status == ResolveStatus::Poisoned
    }
}

/// An unresolved type reference, or an already-canonical primitive type.
#[derive(Clone, Debug)]
pub enum TypeInfo {
    Void,
    Bool,
    Int,
    Inferred,
    Named(Path),
}

/// A constant value produced by compile-time evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

/// An expression node.
#[derive(Clone, Debug)]
pub enum Expr {
    Const(ConstValue),
    Ident(Symbol),
    Call { callee: ExprId, args: SmallVec<[ExprId; 4]> },
    Binary { op: BinOp, lhs: ExprId, rhs: ExprId },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A statement/AST node.
#[derive(Clone, Debug)]
pub enum Ast {
    Block(Vec<AstId>),
    Return(Option<ExprId>),
    ExprStmt(ExprId),
}
