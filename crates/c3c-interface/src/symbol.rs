//! String interning with pointer-identity equality and syntactic
//! classification.

use c3c_data_structures::FxHashSet;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::{fmt, hash::Hash, hash::Hasher, ptr};

/// How a spelling was classified when it was interned.
///
/// c3c classifies every interned identifier by its syntactic shape: a
/// leading uppercase letter followed by any lowercase marks a type name,
/// an all-uppercase spelling marks a compile-time constant, a keyword-table
/// hit marks a keyword, and everything else is a plain identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    Ident,
    ConstIdent,
    TypeIdent,
    Keyword,
}

/// An interned, canonical string.
///
/// Two `Symbol`s are equal iff they refer to the same backing allocation:
/// interning the same spelling twice always returns the same `Symbol`.
#[derive(Clone, Copy)]
pub struct Symbol(&'static str);

impl Symbol {
    /// Interns `s`, returning its canonical `Symbol` and syntactic
    /// classification.
    pub fn intern(s: &str) -> (Self, TokenType) {
        let kind = classify(s);
        (INTERNER.intern(s), kind)
    }

    /// Interns `s` without reclassifying; used when the caller already knows
    /// the token kind (e.g. a keyword recognized by the lexer).
    pub fn intern_as(s: &str, _kind: TokenType) -> Self {
        INTERNER.intern(s)
    }

    pub fn as_str(&self) -> &str {
        self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.0, other.0)
    }
}
impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Pointer identity implies content equality, but we hash content so
        // that `Symbol` can be used as a map key without leaking addresses
        // into hash bucket placement in a way that defeats `FxHasher`.
        self.0.hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

/// Classifies a spelling by its lexical shape: keyword, `CONST_IDENT`,
/// `TypeIdent`, or a plain lowercase identifier.
fn classify(s: &str) -> TokenType {
    if is_keyword(s) {
        return TokenType::Keyword;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            if s.chars().all(|c| c.is_ascii_uppercase() || c == '_' || c.is_ascii_digit()) {
                TokenType::ConstIdent
            } else {
                TokenType::TypeIdent
            }
        }
        _ => TokenType::Ident,
    }
}

const KEYWORDS: &[&str] = &[
    "module", "import", "fn", "return", "if", "else", "while", "for", "const", "var", "struct",
    "union", "enum", "macro", "public", "private", "true", "false", "null", "void", "int", "bool",
];

fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

struct Interner {
    strings: Mutex<FxHashSet<&'static str>>,
}

impl Interner {
    fn intern(&self, s: &str) -> Symbol {
        let mut strings = self.strings.lock();
        if let Some(existing) = strings.get(s) {
            return Symbol(existing);
        }
        // Leaked for the lifetime of the process: one compile per process,
        // so this never grows unbounded in practice.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        strings.insert(leaked);
        Symbol(leaked)
    }
}

static INTERNER: Lazy<Interner> = Lazy::new(|| Interner { strings: Mutex::new(FxHashSet::default()) });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_spelling_is_pointer_equal() {
        let (a, _) = Symbol::intern("hello_world");
        let (b, _) = Symbol::intern("hello_world");
        assert_eq!(a, b);
        assert!(ptr::eq(a.0, b.0));
    }

    #[test]
    fn classification_matches_syntactic_shape() {
        assert_eq!(Symbol::intern("foo").1, TokenType::Ident);
        assert_eq!(Symbol::intern("Foo").1, TokenType::TypeIdent);
        assert_eq!(Symbol::intern("FOO").1, TokenType::ConstIdent);
        assert_eq!(Symbol::intern("fn").1, TokenType::Keyword);
    }
}
