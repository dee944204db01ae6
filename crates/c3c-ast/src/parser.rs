//! A small recursive-descent parser over the lexer's token stream.
//!
//! Builds a [`TranslationContext`] from one source file. This covers
//! module/import clauses, function declarations with a `return`-only body,
//! and top-level `const`/typed variable declarations — not a full c3
//! grammar, but enough to drive every stage of the analysis pipeline.

use crate::{
    arenas::ArenaPool,
    ast::{
        Ast, ConstValue, Decl, DeclKind, Expr, FuncDecl, Path, ResolveStatus, TypeInfo, VarDecl,
        VarKind, Visibility,
    },
    context::TranslationContext,
    lexer::Lexer,
    token::{Token, TokenKind},
};
use c3c_data_structures::{AstId, DeclId, ExprId, TypeInfoId};
use c3c_interface::{DiagCtxt, Symbol};

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    arenas: &'a mut ArenaPool,
    dcx: &'a DiagCtxt,
}

impl<'a> Parser<'a> {
    pub fn new(src: &str, arenas: &'a mut ArenaPool, dcx: &'a DiagCtxt) -> Self {
        Self { tokens: Lexer::new(src).into_tokens(), pos: 0, arenas, dcx }
    }

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].kind
    }

    fn bump(&mut self) -> TokenKind {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].kind;
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(&kind) {
            true
        } else {
            self.dcx.err(format!("expected {}, found {}", kind, self.peek()));
            self.dcx.enter_panic_mode();
            false
        }
    }

    /// Parses one translation unit. Returns `false` if a parse error was
    /// recorded.
    pub fn parse_file(&mut self, ctx: &mut TranslationContext) -> bool {
        self.dcx.exit_panic_mode();
        if matches!(self.peek(), TokenKind::KwModule) {
            self.bump();
            if let TokenKind::Ident(name) = self.bump() {
                ctx.current_module = Some(name);
            } else {
                self.dcx.err("expected module name after 'module'");
            }
            self.expect(TokenKind::Semi);
        }

        while matches!(self.peek(), TokenKind::KwImport) {
            self.bump();
            if let TokenKind::Ident(name) = self.bump() {
                ctx.imports.push(Path { module_name: name, span: Default::default(), length: 1 });
            } else {
                self.dcx.err("expected module name after 'import'");
            }
            self.expect(TokenKind::Semi);
        }

        while !matches!(self.peek(), TokenKind::Eof) {
            match self.parse_top_decl(ctx) {
                Some(id) => ctx.declarations.push(id),
                None => {
                    // Recover by skipping to the next statement boundary so a
                    // single bad declaration doesn't stop the whole file.
                    while !matches!(self.peek(), TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof) {
                        self.bump();
                    }
                    self.eat(&TokenKind::Semi);
                }
            }
        }

        self.dcx.has_errors().is_ok()
    }

    fn parse_top_decl(&mut self, ctx: &TranslationContext) -> Option<DeclId> {
        let module = ctx.current_module?;

        let visibility = match self.peek() {
            TokenKind::KwPublic => {
                self.bump();
                Visibility::Public
            }
            TokenKind::KwPrivate => {
                self.bump();
                Visibility::Local
            }
            _ => Visibility::Module,
        };

        match self.peek() {
            TokenKind::KwFn => self.parse_fn_decl(module, visibility),
            TokenKind::KwConst => self.parse_const_decl(module, visibility),
            TokenKind::TypeIdent(_) => self.parse_var_decl(module, visibility),
            TokenKind::Ident(_) => self.parse_shorthand_var_decl(module, visibility),
            other => {
                self.dcx.err(format!("expected a declaration, found {other}"));
                None
            }
        }
    }

    fn parse_fn_decl(&mut self, module: Symbol, visibility: Visibility) -> Option<DeclId> {
        self.bump(); // `fn`
        let return_type = self.parse_type();
        let name = match self.bump() {
            TokenKind::Ident(name) => name,
            other => {
                self.dcx.err(format!("expected function name, found {other}"));
                return None;
            }
        };
        self.expect(TokenKind::LParen);
        self.expect(TokenKind::RParen);
        let body = self.parse_block();

        let decl = Decl {
            name,
            module,
            visibility,
            kind: DeclKind::Func(FuncDecl { return_type, params: smallvec::SmallVec::new(), body }),
            resolve_status: ResolveStatus::Pending,
            ty: None,
            external_name: None,
        };
        Some(self.arenas.decl.alloc(decl))
    }

    fn parse_block(&mut self) -> Option<AstId> {
        if !self.expect(TokenKind::LBrace) {
            return None;
        }
        let mut stmts = Vec::new();
        while !matches!(self.peek(), TokenKind::RBrace | TokenKind::Eof) {
            if let Some(stmt) = self.parse_stmt() {
                stmts.push(stmt);
            }
        }
        self.expect(TokenKind::RBrace);
        Some(self.arenas.ast.alloc(Ast::Block(stmts)))
    }

    fn parse_stmt(&mut self) -> Option<AstId> {
        if matches!(self.peek(), TokenKind::KwReturn) {
            self.bump();
            let expr = if matches!(self.peek(), TokenKind::Semi) { None } else { self.parse_expr() };
            self.expect(TokenKind::Semi);
            return Some(self.arenas.ast.alloc(Ast::Return(expr)));
        }
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi);
        Some(self.arenas.ast.alloc(Ast::ExprStmt(expr)))
    }

    fn parse_const_decl(&mut self, module: Symbol, visibility: Visibility) -> Option<DeclId> {
        self.bump(); // `const`
        let name = match self.bump() {
            TokenKind::ConstIdent(name) => name,
            other => {
                self.dcx.err(format!("expected CONST_IDENT after 'const', found {other}"));
                return None;
            }
        };
        self.expect(TokenKind::Eq);
        let init_expr = self.parse_expr();
        self.expect(TokenKind::Semi);

        let decl = Decl {
            name,
            module,
            visibility,
            kind: DeclKind::Var(VarDecl {
                kind: VarKind::Const,
                constant: true,
                type_info: None,
                init_expr,
            }),
            resolve_status: ResolveStatus::Pending,
            ty: None,
            external_name: None,
        };
        Some(self.arenas.decl.alloc(decl))
    }

    fn parse_var_decl(&mut self, module: Symbol, visibility: Visibility) -> Option<DeclId> {
        let type_info = self.parse_type();
        let name = match self.bump() {
            TokenKind::Ident(name) => name,
            other => {
                self.dcx.err(format!("expected variable name, found {other}"));
                return None;
            }
        };
        let init_expr = if self.eat(&TokenKind::Eq) { self.parse_expr() } else { None };
        self.expect(TokenKind::Semi);

        let decl = Decl {
            name,
            module,
            visibility,
            kind: DeclKind::Var(VarDecl {
                kind: VarKind::Global,
                constant: false,
                type_info: Some(type_info),
                init_expr,
            }),
            resolve_status: ResolveStatus::Pending,
            ty: None,
            external_name: None,
        };
        Some(self.arenas.decl.alloc(decl))
    }

    /// `name := expr;` shorthand, treated at the top level as an
    /// inferred-type global declaration.
    fn parse_shorthand_var_decl(&mut self, module: Symbol, visibility: Visibility) -> Option<DeclId> {
        let name = match self.bump() {
            TokenKind::Ident(name) => name,
            other => {
                self.dcx.err(format!("expected identifier, found {other}"));
                return None;
            }
        };
        if !self.expect(TokenKind::ColonEq) {
            return None;
        }
        let init_expr = self.parse_expr();
        self.expect(TokenKind::Semi);
        let type_info = self.arenas.type_info.alloc(TypeInfo::Inferred);

        let decl = Decl {
            name,
            module,
            visibility,
            kind: DeclKind::Var(VarDecl {
                kind: VarKind::Global,
                constant: false,
                type_info: Some(type_info),
                init_expr,
            }),
            resolve_status: ResolveStatus::Pending,
            ty: None,
            external_name: None,
        };
        Some(self.arenas.decl.alloc(decl))
    }

    fn parse_type(&mut self) -> TypeInfoId {
        let info = match self.bump() {
            TokenKind::Ident(sym) if sym.as_str() == "int" => TypeInfo::Int,
            TokenKind::Ident(sym) if sym.as_str() == "bool" => TypeInfo::Bool,
            TokenKind::Ident(sym) if sym.as_str() == "void" => TypeInfo::Void,
            TokenKind::TypeIdent(sym) => {
                TypeInfo::Named(Path { module_name: sym, span: Default::default(), length: 1 })
            }
            other => {
                self.dcx.err(format!("expected a type, found {other}"));
                TypeInfo::Void
            }
        };
        self.arenas.type_info.alloc(info)
    }

    fn parse_expr(&mut self) -> Option<ExprId> {
        // The grammar subset this parser covers has no infix operators yet;
        // `BinOp`/`Expr::Binary` exist for the type-checking stages to
        // consume once arithmetic expressions are added.
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Option<ExprId> {
        let expr = match self.bump() {
            TokenKind::IntLiteral(v) => Expr::Const(ConstValue::Int(v)),
            TokenKind::KwTrue => Expr::Const(ConstValue::Bool(true)),
            TokenKind::KwFalse => Expr::Const(ConstValue::Bool(false)),
            TokenKind::Ident(sym) | TokenKind::ConstIdent(sym) | TokenKind::TypeIdent(sym) => {
                Expr::Ident(sym)
            }
            other => {
                self.dcx.err(format!("expected an expression, found {other}"));
                return None;
            }
        };
        Some(self.arenas.expr.alloc(expr))
    }
}

/// Parses `ctx.file`'s contents into `ctx`, using `arenas` for node storage.
///
/// Returns `false` if any diagnostic error was recorded while parsing this
/// file.
pub fn parse_file(ctx: &mut TranslationContext, arenas: &mut ArenaPool, dcx: &DiagCtxt) -> bool {
    let src = ctx.file.contents.clone();
    let mut parser = Parser::new(&src, arenas, dcx);
    parser.parse_file(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use c3c_interface::File;
    use std::{path::PathBuf, sync::Arc};

    fn ctx(src: &str) -> TranslationContext {
        let file = Arc::new(File {
            id: Default::default(),
            full_path: PathBuf::from("test.c3"),
            contents: src.to_string(),
        });
        TranslationContext::new(file)
    }

    #[test]
    fn parses_module_and_function() {
        let dcx = DiagCtxt::new();
        let mut arenas = ArenaPool::new();
        let mut tc = ctx("module hello; fn int main() { return 0; }");
        assert!(parse_file(&mut tc, &mut arenas, &dcx));
        assert_eq!(tc.current_module.unwrap().as_str(), "hello");
        assert_eq!(tc.declarations.len(), 1);
    }

    #[test]
    fn parses_import() {
        let dcx = DiagCtxt::new();
        let mut arenas = ArenaPool::new();
        let mut tc = ctx("module a; import io;");
        assert!(parse_file(&mut tc, &mut arenas, &dcx));
        assert_eq!(tc.imports.len(), 1);
        assert_eq!(tc.imports[0].module_name.as_str(), "io");
    }
}
