//! AST pretty printing for `--parse-only` mode.
//!
//! Grounded on `solar_sema::hir::pretty::HirPrettyPrinter`: a small
//! indent-tracking printer that writes a source-like rendering of the tree
//! rather than a `{:#?}` derive dump.

use crate::{
    arenas::ArenaPool,
    ast::{Ast, Decl, DeclKind, Expr, TypeInfo, Visibility},
    context::TranslationContext,
};
use c3c_data_structures::index::TypeInfoId;
use std::fmt::{self, Write};

/// Pretty-prints every declaration in `ctx` against `arenas`, returning the
/// rendered text (one line per declaration, nested bodies indented).
pub fn print_translation_context(ctx: &TranslationContext, arenas: &ArenaPool) -> String {
    let mut out = String::new();
    let mut printer = AstPrinter { arenas, indent: 0 };

    if let Some(module) = ctx.current_module {
        let _ = writeln!(out, "module {module};");
    }
    for import in &ctx.imports {
        let _ = writeln!(out, "import {};", import.module_name);
    }
    for &decl_id in &ctx.declarations {
        let _ = printer.fmt_decl(arenas.decl.get(decl_id), &mut out);
    }
    out
}

struct AstPrinter<'a> {
    arenas: &'a ArenaPool,
    indent: usize,
}

impl<'a> AstPrinter<'a> {
    fn write_indent(&self, f: &mut impl Write) -> fmt::Result {
        for _ in 0..self.indent {
            f.write_str("    ")?;
        }
        Ok(())
    }

    fn indented<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    fn fmt_decl(&mut self, decl: &Decl, f: &mut impl Write) -> fmt::Result {
        self.write_indent(f)?;
        let vis = match decl.visibility {
            Visibility::Public => "public ",
            Visibility::Module => "",
            Visibility::Local => "private ",
        };
        match &decl.kind {
            DeclKind::Func(func) => {
                write!(f, "{vis}fn {} {}(", self.fmt_type(func.return_type), decl.name)?;
                writeln!(f, ") {{")?;
                if let Some(body) = func.body {
                    self.indented(|this| this.fmt_ast(this.arenas.ast.get(body), f))?;
                }
                writeln!(f, "}}")
            }
            DeclKind::Var(var) => {
                let ty = var.type_info.map(|t| self.fmt_type(t)).unwrap_or_else(|| "var".to_string());
                write!(f, "{vis}{ty} {}", decl.name)?;
                if let Some(init) = var.init_expr {
                    write!(f, " = {}", self.fmt_expr(self.arenas.expr.get(init)))?;
                }
                writeln!(f, ";")
            }
            DeclKind::Type => writeln!(f, "{vis}type {};", decl.name),
            DeclKind::Macro => writeln!(f, "{vis}macro {}(...);", decl.name),
            DeclKind::Enum => writeln!(f, "{vis}enum {} {{ }}", decl.name),
            DeclKind::Struct => writeln!(f, "{vis}struct {} {{ }}", decl.name),
            DeclKind::Union => writeln!(f, "{vis}union {} {{ }}", decl.name),
        }
    }

    fn fmt_ast(&mut self, node: &Ast, f: &mut impl Write) -> fmt::Result {
        match node {
            Ast::Block(stmts) => {
                for &id in stmts {
                    let stmt = self.arenas.ast.get(id);
                    self.fmt_ast(stmt, f)?;
                }
                Ok(())
            }
            Ast::Return(expr) => {
                self.write_indent(f)?;
                match expr {
                    Some(id) => writeln!(f, "return {};", self.fmt_expr(self.arenas.expr.get(*id))),
                    None => writeln!(f, "return;"),
                }
            }
            Ast::ExprStmt(id) => {
                self.write_indent(f)?;
                writeln!(f, "{};", self.fmt_expr(self.arenas.expr.get(*id)))
            }
        }
    }

    fn fmt_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Const(value) => format!("{value:?}"),
            Expr::Ident(sym) => sym.to_string(),
            Expr::Call { callee, args } => {
                let callee = self.fmt_expr(self.arenas.expr.get(*callee));
                let args: Vec<_> = args.iter().map(|&id| self.fmt_expr(self.arenas.expr.get(id))).collect();
                format!("{callee}({})", args.join(", "))
            }
            Expr::Binary { op, lhs, rhs } => {
                format!(
                    "({} {:?} {})",
                    self.fmt_expr(self.arenas.expr.get(*lhs)),
                    op,
                    self.fmt_expr(self.arenas.expr.get(*rhs))
                )
            }
        }
    }

    fn fmt_type(&self, id: TypeInfoId) -> String {
        match self.arenas.type_info.get(id) {
            TypeInfo::Void => "void".to_string(),
            TypeInfo::Bool => "bool".to_string(),
            TypeInfo::Int => "int".to_string(),
            TypeInfo::Inferred => "var".to_string(),
            TypeInfo::Named(path) => path.module_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_file;
    use c3c_interface::{DiagCtxt, File};
    use std::{path::PathBuf, sync::Arc};

    #[test]
    fn prints_a_function_declaration() {
        let file = Arc::new(File {
            id: Default::default(),
            full_path: PathBuf::from("hello.c3"),
            contents: "module hello; public fn int main() { return 0; }".to_string(),
        });
        let mut ctx = TranslationContext::new(file);
        let mut arenas = ArenaPool::new();
        let dcx = DiagCtxt::new();
        assert!(parse_file(&mut ctx, &mut arenas, &dcx));

        let printed = print_translation_context(&ctx, &arenas);
        assert!(printed.contains("module hello;"));
        assert!(printed.contains("public fn int main"));
        assert!(printed.contains("return Int(0);"));
    }
}
