//! The per-source-file parse state.

use crate::ast::Path;
use c3c_data_structures::DeclId;
use c3c_interface::{File, Symbol};
use std::sync::Arc;

/// `{ file, imports, declarations, current_module }` — populated by the
/// parser, immutable after parse.
pub struct TranslationContext {
    pub file: Arc<File>,
    pub imports: Vec<Path>,
    pub declarations: Vec<DeclId>,
    pub current_module: Option<Symbol>,
}

impl TranslationContext {
    pub fn new(file: Arc<File>) -> Self {
        Self { file, imports: Vec::new(), declarations: Vec::new(), current_module: None }
    }
}
