//! Stage pass bodies.
//!
//! A real type checker, const evaluator, and conditional-compilation
//! resolver sit behind each of these stages; what's implemented here is
//! each stage's *contract* — what observably changes in a module's symbol
//! tables and declarations by the time it reaches that stage.

use crate::global::GlobalContext;
use crate::module::ModuleId;
use crate::registry::SymbolLookup;
use crate::stage::AnalysisStage;
use c3c_ast::ast::{Ast, DeclKind, Expr, ResolveStatus};
use c3c_data_structures::{AstId, DeclId, ExprId};

pub(crate) fn run_stage(gcx: &mut GlobalContext, id: ModuleId, stage: AnalysisStage) {
    match stage {
        AnalysisStage::NotBegun => unreachable!("NOT_BEGUN is never entered, only the starting point"),
        AnalysisStage::Imports => imports(gcx, id),
        AnalysisStage::RegisterGlobals => register_globals(gcx, id),
        AnalysisStage::ConditionalCompilation => conditional_compilation(gcx, id),
        AnalysisStage::Decls => decls(gcx, id),
        AnalysisStage::CtAssert => ct_assert(gcx, id),
        AnalysisStage::Functions => functions(gcx, id),
    }
}

/// `IMPORTS`: resolves every `import` clause collected by the parser to a
/// module, creating it if it's not registered yet so it joins the pipeline
/// at whatever stage is currently in progress.
fn imports(gcx: &mut GlobalContext, id: ModuleId) {
    let import_paths: Vec<_> =
        gcx.module(id).contexts.iter().flat_map(|ctx| ctx.imports.iter().copied()).collect();
    tracing::trace!(module = %gcx.module(id).module_name(), imports = import_paths.len(), "IMPORTS");
    for path in import_paths {
        gcx.find_or_create_module(path, None);
    }
}

/// `REGISTER_GLOBALS`: interns every top-level declaration's name into the
/// module's own symbol table, and into the global/qualified registry when
/// the declaration is public.
fn register_globals(gcx: &mut GlobalContext, id: ModuleId) {
    let module_name = gcx.module(id).module_name();
    let decl_ids: Vec<DeclId> =
        gcx.module(id).contexts.iter().flat_map(|ctx| ctx.declarations.iter().copied()).collect();

    tracing::trace!(module = %module_name, decls = decl_ids.len(), "REGISTER_GLOBALS");

    for decl_id in decl_ids {
        let decl = gcx.arenas.decl.get(decl_id);
        let name = decl.name;
        let is_public = decl.is_public();

        gcx.module_mut(id).symbols.set(name, decl_id);
        if is_public {
            gcx.module_mut(id).public_symbols.set(name, decl_id);
            gcx.register_public_symbol(name, module_name, decl_id);
        }
    }
}

/// `CONDITIONAL_COMPILATION`: this grammar subset has no `$if`/`$switch`
/// syntax to evaluate, so the stage is a pure pass-through.
fn conditional_compilation(_gcx: &mut GlobalContext, _id: ModuleId) {}

/// `DECLS`: full type resolution is out of scope here, but a variable's
/// initializer is walked for unqualified-name references (spec §4.5's
/// Guarantee, scenario S6): a reference that resolves to a poisoned global
/// slot is reported as an ambiguous-symbol diagnostic and the declaration
/// is left `Poisoned` instead of `Done`.
fn decls(gcx: &mut GlobalContext, id: ModuleId) {
    let decl_ids: Vec<DeclId> =
        gcx.module(id).contexts.iter().flat_map(|ctx| ctx.declarations.iter().copied()).collect();
    for decl_id in decl_ids {
        let init_expr = match &gcx.arenas.decl.get(decl_id).kind {
            DeclKind::Var(var) => var.init_expr,
            _ => None,
        };
        let ambiguous = init_expr.is_some_and(|expr_id| resolve_idents_in_expr(gcx, expr_id));

        let decl = gcx.arenas.decl.get_mut(decl_id);
        if ambiguous {
            decl.resolve_status = ResolveStatus::Poisoned;
        } else if decl.resolve_status == ResolveStatus::Pending {
            decl.resolve_status = ResolveStatus::Done;
        }
    }
}

/// `CT_ASSERT`: compile-time assertion evaluation is out of scope; no
/// assertion syntax exists in this grammar subset.
fn ct_assert(_gcx: &mut GlobalContext, _id: ModuleId) {}

/// `FUNCTIONS`: function-body analysis internals are out of scope beyond
/// the same unqualified-name resolution `decls` performs for initializers
/// (spec §4.5's Guarantee, scenario S2/S6), walked here over each
/// function's body.
fn functions(gcx: &mut GlobalContext, id: ModuleId) {
    let decl_ids: Vec<DeclId> =
        gcx.module(id).contexts.iter().flat_map(|ctx| ctx.declarations.iter().copied()).collect();
    for decl_id in decl_ids {
        let body = match &gcx.arenas.decl.get(decl_id).kind {
            DeclKind::Func(func) => func.body,
            _ => None,
        };
        let ambiguous = body.is_some_and(|ast_id| resolve_idents_in_ast(gcx, ast_id));
        if ambiguous {
            gcx.arenas.decl.get_mut(decl_id).resolve_status = ResolveStatus::Poisoned;
        }
    }
    tracing::debug!(module = %gcx.module(id).module_name(), "module reached ANALYSIS_LAST");
}

/// Recursively resolves every `Expr::Ident` reachable from `expr_id`
/// against the global public-symbol table. A poisoned slot was recorded
/// silently back in `REGISTER_GLOBALS`; this is where the ambiguity
/// finally surfaces as a diagnostic. Returns whether any ambiguity was
/// found. A name that resolves to nothing is not this pass's concern.
fn resolve_idents_in_expr(gcx: &GlobalContext, expr_id: ExprId) -> bool {
    match gcx.arenas.expr.get(expr_id) {
        Expr::Const(_) => false,
        Expr::Ident(name) => match gcx.lookup_unqualified(*name) {
            SymbolLookup::Ambiguous => {
                gcx.session
                    .dcx
                    .err(format!("`{name}` is ambiguous: declared publicly by more than one module"));
                true
            }
            SymbolLookup::Found(_) | SymbolLookup::NotFound => false,
        },
        Expr::Call { callee, args } => {
            let mut ambiguous = resolve_idents_in_expr(gcx, *callee);
            for &arg in args {
                ambiguous |= resolve_idents_in_expr(gcx, arg);
            }
            ambiguous
        }
        Expr::Binary { lhs, rhs, .. } => {
            let lhs_ambiguous = resolve_idents_in_expr(gcx, *lhs);
            let rhs_ambiguous = resolve_idents_in_expr(gcx, *rhs);
            lhs_ambiguous || rhs_ambiguous
        }
    }
}

fn resolve_idents_in_ast(gcx: &GlobalContext, ast_id: AstId) -> bool {
    match gcx.arenas.ast.get(ast_id) {
        Ast::Block(stmts) => stmts.iter().fold(false, |ambiguous, &stmt| {
            ambiguous | resolve_idents_in_ast(gcx, stmt)
        }),
        Ast::Return(Some(expr_id)) => resolve_idents_in_expr(gcx, *expr_id),
        Ast::Return(None) => false,
        Ast::ExprStmt(expr_id) => resolve_idents_in_expr(gcx, *expr_id),
    }
}
