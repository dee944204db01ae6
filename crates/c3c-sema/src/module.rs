//! `Module`: the unit of semantic analysis.

use crate::stable::STable;
use crate::stage::AnalysisStage;
use c3c_ast::{ast::Path, TranslationContext};
use c3c_data_structures::{arena_index, DeclId};
use c3c_interface::Symbol;

arena_index! {
    /// A stable handle to a [`Module`] stored in the [`crate::global::GlobalContext`]'s
    /// module slab.
    pub struct ModuleId;
}

/// `{ name, stage, parameters?, symbols, public_symbols, contexts, generic }`.
///
/// Invariants maintained by this crate:
/// - `stage` only ever moves forward.
/// - `symbols` contains every declaration visible inside the module;
///   `public_symbols` is the exported subset.
/// - A module with `parameters.is_some()` is `generic` and lives in the
///   generic module list, never the regular one.
pub struct Module {
    pub name: Path,
    pub stage: AnalysisStage,
    pub parameters: Option<Vec<Symbol>>,
    pub symbols: STable<DeclId>,
    pub public_symbols: STable<DeclId>,
    pub contexts: Vec<TranslationContext>,
    pub generic: bool,
}

impl Module {
    pub fn new(name: Path, parameters: Option<Vec<Symbol>>) -> Self {
        let generic = parameters.is_some();
        Self {
            name,
            stage: AnalysisStage::NotBegun,
            parameters,
            symbols: STable::with_capacity(0x100),
            public_symbols: STable::with_capacity(0x40),
            contexts: Vec::new(),
            generic,
        }
    }

    pub fn module_name(&self) -> Symbol {
        self.name.module_name
    }

    /// Advances `stage` forward by exactly one step. Panics if called when
    /// already at [`AnalysisStage::LAST`] — callers must check first.
    pub(crate) fn advance_stage(&mut self) -> AnalysisStage {
        let next = self.stage.next().expect("advance_stage called past ANALYSIS_LAST");
        self.stage = next;
        next
    }
}
