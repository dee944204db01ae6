//! The public-symbol registry: global and per-module qualified lookup
//! tables with ambiguity poisoning, and module creation.

use crate::global::GlobalContext;
use crate::module::{Module, ModuleId};
use crate::stable::{STable, Slot};
use c3c_ast::ast::Path;
use c3c_data_structures::DeclId;
use c3c_interface::Symbol;

impl GlobalContext {
    /// Registers `decl_id` (declared `name`, owned by `module_name`) as a
    /// globally visible public symbol.
    ///
    /// Inserted under the bare name into `global_symbols`, and under
    /// `module_name`'s sub-table in `qualified_symbols`. A name already
    /// occupied by a *different* declaration poisons the slot instead of
    /// overwriting it — re-registering the same declaration a second time
    /// is not an ambiguity.
    pub fn register_public_symbol(&mut self, name: Symbol, module_name: Symbol, decl_id: DeclId) {
        insert_slot(&mut self.global_symbols, name, decl_id);

        match self.qualified_symbols.get_mut(module_name) {
            Some(table) => insert_slot(table, name, decl_id),
            None => {
                let mut table = STable::with_capacity(0x10);
                table.set(name, Slot::Unique(decl_id));
                self.qualified_symbols.set(module_name, table);
            }
        }
    }

    /// Finds the module named by `path`, creating and registering it (in
    /// the regular or generic module list, per `parameters`) if it doesn't
    /// exist yet. Idempotent on repeated calls with the same name.
    pub fn find_or_create_module(&mut self, path: Path, parameters: Option<Vec<Symbol>>) -> ModuleId {
        if let Some(&id) = self.modules_by_name.get(path.module_name) {
            return id;
        }
        let generic = parameters.is_some();
        let id = self.modules.alloc(Module::new(path, parameters));
        self.modules_by_name.set(path.module_name, id);
        if generic {
            self.generic_module_list.push(id);
        } else {
            self.module_list.push(id);
        }
        id
    }

    pub fn find_module(&self, name: Symbol) -> Option<&Module> {
        self.modules_by_name.get(name).map(|&id| self.modules.get(id))
    }

    /// Looks up a bare name in the global public-symbol table, ignoring
    /// poisoned slots.
    pub fn find_symbol(&self, name: Symbol) -> Option<DeclId> {
        self.global_symbols.get(name).and_then(Slot::unique).copied()
    }

    /// Resolves an unqualified name against the global public-symbol table,
    /// distinguishing "ambiguous" from "not found" — the distinction
    /// [`Self::find_symbol`] collapses, but that a use-site resolver needs
    /// in order to turn a poisoned slot into a diagnostic (spec §4.5's
    /// Guarantee).
    pub fn lookup_unqualified(&self, name: Symbol) -> SymbolLookup {
        match self.global_symbols.get(name) {
            Some(Slot::Unique(id)) => SymbolLookup::Found(*id),
            Some(Slot::Poisoned) => SymbolLookup::Ambiguous,
            None => SymbolLookup::NotFound,
        }
    }
}

/// The outcome of resolving an unqualified name against the global
/// public-symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolLookup {
    Found(DeclId),
    /// Two or more modules publicly declare this name; per spec §4.5 this
    /// is a compile error raised at the use site, not at registration.
    Ambiguous,
    NotFound,
}

fn insert_slot(table: &mut STable<Slot<DeclId>>, name: Symbol, decl_id: DeclId) {
    match table.get(name) {
        None => {
            table.set(name, Slot::Unique(decl_id));
        }
        Some(Slot::Unique(existing)) if *existing == decl_id => {}
        _ => {
            table.set(name, Slot::Poisoned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global::GlobalContext;
    use c3c_ast::token::Span;
    use c3c_interface::Session;

    fn path(name: Symbol) -> Path {
        Path { module_name: name, span: Span::default(), length: 1 }
    }

    #[test]
    fn duplicate_registration_poisons_the_slot() {
        let session = Session::new();
        let mut gcx = GlobalContext::new(session, None);
        let (a_mod, _) = Symbol::intern("a");
        let (b_mod, _) = Symbol::intern("b");
        let (foo, _) = Symbol::intern("foo");

        let first = gcx.arenas.decl.alloc(dummy_decl(foo, a_mod));
        let second = gcx.arenas.decl.alloc(dummy_decl(foo, b_mod));

        gcx.register_public_symbol(foo, a_mod, first);
        assert_eq!(gcx.find_symbol(foo), Some(first));

        gcx.register_public_symbol(foo, b_mod, second);
        assert_eq!(gcx.find_symbol(foo), None, "ambiguous name must not resolve");
        assert!(gcx.global_symbols.get(foo).unwrap().is_poisoned());
    }

    #[test]
    fn find_or_create_module_is_idempotent() {
        let session = Session::new();
        let mut gcx = GlobalContext::new(session, None);
        let (name, _) = Symbol::intern("hello");

        let first = gcx.find_or_create_module(path(name), None);
        let second = gcx.find_or_create_module(path(name), None);
        assert_eq!(first, second);
        assert_eq!(gcx.module_list.len(), 1);
    }

    fn dummy_decl(name: Symbol, module: Symbol) -> c3c_ast::ast::Decl {
        c3c_ast::ast::Decl {
            name,
            module,
            visibility: c3c_ast::ast::Visibility::Public,
            kind: c3c_ast::ast::DeclKind::Type,
            resolve_status: c3c_ast::ast::ResolveStatus::Pending,
            ty: None,
            external_name: None,
        }
    }
}
