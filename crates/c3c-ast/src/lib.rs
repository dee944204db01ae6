//! Tokens, lexer, parser, and the arena-indexed `Decl`/`Expr`/`Ast`/`TypeInfo`
//! tree types.

pub mod arenas;
pub mod ast;
pub mod context;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod token;

pub use arenas::{ArenaPool, ArenaStats};
pub use context::TranslationContext;
pub use lexer::Lexer;
pub use parser::parse_file;
pub use pretty::print_translation_context;
pub use token::{Span, Token, TokenKind};
