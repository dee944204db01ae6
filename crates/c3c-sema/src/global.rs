//! `GlobalContext`: the driver-owned value holding everything one compile
//! invocation needs, instead of process-wide statics.
//!
//! Bundles the module registry, the public-symbol tables, the arena pool,
//! and the session, and drives the staged analysis pipeline itself.

use crate::module::{Module, ModuleId};
use crate::passes;
use crate::stable::{STable, Slot};
use crate::stage::AnalysisStage;
use c3c_ast::ast::{ConstValue, Decl, DeclKind, Path, ResolveStatus, VarDecl, VarKind, Visibility};
use c3c_ast::{ArenaPool, Span};
use c3c_data_structures::{DeclId, IndexArena};
use c3c_interface::{Result, Session, Symbol};
use std::path::PathBuf;

/// Owns everything one compile invocation needs beyond the session:
/// modules, arenas, and the public-symbol registry.
pub struct GlobalContext {
    pub session: Session,
    pub arenas: ArenaPool,

    pub(crate) modules: IndexArena<Module, ModuleId>,
    pub(crate) modules_by_name: STable<ModuleId>,
    pub module_list: Vec<ModuleId>,
    pub generic_module_list: Vec<ModuleId>,

    pub(crate) global_symbols: STable<Slot<DeclId>>,
    pub(crate) qualified_symbols: STable<STable<Slot<DeclId>>>,

    pub std_module: Option<ModuleId>,
    pub lib_dir: Option<PathBuf>,
}

/// Default capacity of the global symbol table when `--symtab-size` isn't
/// given, matching `compiler.c`'s `symtab_init(... : 64 * 1024)` fallback.
const DEFAULT_SYMTAB_CAPACITY: usize = 0x200;

impl GlobalContext {
    pub fn new(session: Session, lib_dir: Option<PathBuf>) -> Self {
        Self::with_symtab_capacity(session, lib_dir, None)
    }

    /// Like [`Self::new`], but honoring a `--symtab-size` capacity hint for
    /// the global symbol table (a power-of-two hint per spec §4.2; `None`
    /// falls back to [`DEFAULT_SYMTAB_CAPACITY`]).
    pub fn with_symtab_capacity(
        session: Session,
        lib_dir: Option<PathBuf>,
        symtab_capacity: Option<usize>,
    ) -> Self {
        let capacity = symtab_capacity.unwrap_or(DEFAULT_SYMTAB_CAPACITY);
        Self {
            session,
            arenas: ArenaPool::new(),
            modules: IndexArena::new(),
            modules_by_name: STable::with_capacity(0x100),
            module_list: Vec::new(),
            generic_module_list: Vec::new(),
            global_symbols: STable::with_capacity(capacity),
            qualified_symbols: STable::with_capacity(0x40),
            std_module: None,
            lib_dir,
        }
    }

    pub fn module(&self, id: ModuleId) -> &Module {
        self.modules.get(id)
    }

    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        self.modules.get_mut(id)
    }

    /// Bootstraps the synthetic standard-library module and pre-registers
    /// its compile-time constants, elevating it straight to
    /// [`AnalysisStage::LAST`] so user modules can reference its symbols
    /// without it ever running through the pipeline itself.
    pub fn bootstrap_std_module(&mut self) {
        let (std_name, _) = Symbol::intern("std");
        let path = Path { module_name: std_name, span: Span::default(), length: 1 };
        let id = self.find_or_create_module(path, None);

        self.add_global_define_int("OS_TYPE", 0);
        self.add_global_define("COMPILER_VERSION", "0.1.0");

        let module = self.modules.get_mut(id);
        module.stage = AnalysisStage::LAST;
        self.std_module = Some(id);
    }

    /// Defines a resolved string constant directly in `std_module`'s symbol
    /// tables, bypassing parsing.
    pub fn add_global_define(&mut self, name: &str, value: &str) {
        self.define_std_const(name, ConstValue::Str(value.to_string()));
    }

    /// Defines a resolved integer constant directly in `std_module`'s
    /// symbol tables.
    pub fn add_global_define_int(&mut self, name: &str, value: i64) {
        self.define_std_const(name, ConstValue::Int(value));
    }

    fn define_std_const(&mut self, name: &str, value: ConstValue) {
        let (sym, _) = Symbol::intern(name);
        let (std_name, _) = Symbol::intern("std");
        let expr_id = self.arenas.expr.alloc(c3c_ast::ast::Expr::Const(value));
        let decl_id = self.arenas.decl.alloc(Decl {
            name: sym,
            module: std_name,
            visibility: Visibility::Public,
            kind: DeclKind::Var(VarDecl {
                kind: VarKind::Const,
                constant: true,
                type_info: None,
                init_expr: Some(expr_id),
            }),
            resolve_status: ResolveStatus::Done,
            ty: None,
            external_name: None,
        });

        if let Some(id) = self.std_module {
            let module = self.modules.get_mut(id);
            module.symbols.set(sym, decl_id);
            module.public_symbols.set(sym, decl_id);
        }
        self.register_public_symbol(sym, std_name, decl_id);
    }

    /// Runs every module in [`Self::module_list`] and
    /// [`Self::generic_module_list`] through every stage up to and
    /// including `target`, strictly in stage order: every module finishes
    /// stage *k* before any module begins stage *k+1*, except for modules
    /// discovered mid-pipeline (e.g. via imports processed during
    /// `IMPORTS`), which catch up to the in-progress stage immediately
    /// rather than waiting for the next full pass.
    pub fn analyze_to_stage(&mut self, target: AnalysisStage) -> Result<()> {
        for &stage in AnalysisStage::ORDER.iter().skip(1) {
            if stage > target {
                break;
            }
            let mut i = 0;
            while i < self.module_list.len() {
                let id = self.module_list[i];
                self.run_module_to_stage(id, stage);
                i += 1;
            }
            i = 0;
            while i < self.generic_module_list.len() {
                let id = self.generic_module_list[i];
                self.run_module_to_stage(id, stage);
                i += 1;
            }
            self.session.dcx.has_errors()?;
        }
        Ok(())
    }

    fn run_module_to_stage(&mut self, id: ModuleId, target: AnalysisStage) {
        loop {
            let current = self.modules.get(id).stage;
            if current >= target {
                break;
            }
            let next = current.next().expect("stage advance requested past ANALYSIS_LAST");
            passes::run_stage(self, id, next);
            self.modules.get_mut(id).advance_stage();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_registers_std_module_at_last_stage() {
        let mut gcx = GlobalContext::new(Session::new(), None);
        gcx.bootstrap_std_module();
        let id = gcx.std_module.unwrap();
        assert_eq!(gcx.module(id).stage, AnalysisStage::LAST);

        let (os_type, _) = Symbol::intern("OS_TYPE");
        assert!(gcx.find_symbol(os_type).is_some());
    }

    #[test]
    fn analyze_to_stage_advances_every_module_in_lockstep() {
        let mut gcx = GlobalContext::new(Session::new(), None);
        let (a, _) = Symbol::intern("a");
        let (b, _) = Symbol::intern("b");
        gcx.find_or_create_module(Path { module_name: a, span: Span::default(), length: 1 }, None);
        gcx.find_or_create_module(Path { module_name: b, span: Span::default(), length: 1 }, None);

        gcx.analyze_to_stage(AnalysisStage::RegisterGlobals).unwrap();
        for &id in &gcx.module_list {
            assert_eq!(gcx.module(id).stage, AnalysisStage::RegisterGlobals);
        }
    }
}
