//! A small cursor-based lexer, scaled down to the subset grammar this
//! driver needs to exercise.

use crate::token::{Span, Token, TokenKind};
use c3c_interface::{symbol::TokenType as Classification, Symbol};

pub struct Lexer<'src> {
    src: &'src str,
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    pos: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        Self { src, chars: src.char_indices().peekable(), pos: 0 }
    }

    fn bump(&mut self) -> Option<char> {
        let (i, c) = self.chars.next()?;
        self.pos = i as u32 + c.len_utf8() as u32;
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    if ahead.peek().map(|&(_, c)| c) == Some('/') {
                        while let Some(c) = self.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.bump();
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// Advances the lexer, returning the next token. Returns a
    /// [`TokenKind::Eof`] token forever once the source is exhausted.
    pub fn advance(&mut self) -> Token {
        self.skip_trivia();
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Token::new(TokenKind::Eof, Span::new(start, start));
        };

        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            ':' => {
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::ColonEq
                } else {
                    TokenKind::Colon
                }
            }
            '=' => TokenKind::Eq,
            c if c.is_ascii_digit() => {
                let mut end = self.pos;
                let mut value: i64 = c.to_digit(10).unwrap() as i64;
                while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
                    self.bump();
                    end = self.pos;
                    value = value * 10 + d as i64;
                }
                let _ = end;
                TokenKind::IntLiteral(value)
            }
            c if is_ident_start(c) => {
                let start_idx = (start) as usize;
                while let Some(c) = self.peek() {
                    if is_ident_continue(c) {
                        self.bump();
                    } else {
                        break;
                    }
                }
                let end_idx = self.pos as usize;
                let text = &self.src[start_idx..end_idx];
                ident_or_keyword(text)
            }
            other => TokenKind::Unknown(other),
        };

        Token::new(kind, Span::new(start, self.pos))
    }

    /// Collects every token up to and including the final [`TokenKind::Eof`].
    pub fn into_tokens(mut self) -> Vec<Token> {
        let mut out = Vec::new();
        loop {
            let tok = self.advance();
            let is_eof = tok.kind.is_eof();
            out.push(tok);
            if is_eof {
                break;
            }
        }
        out
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn ident_or_keyword(text: &str) -> TokenKind {
    match text {
        "module" => return TokenKind::KwModule,
        "import" => return TokenKind::KwImport,
        "fn" => return TokenKind::KwFn,
        "return" => return TokenKind::KwReturn,
        "const" => return TokenKind::KwConst,
        "var" => return TokenKind::KwVar,
        "public" => return TokenKind::KwPublic,
        "private" => return TokenKind::KwPrivate,
        "true" => return TokenKind::KwTrue,
        "false" => return TokenKind::KwFalse,
        _ => {}
    }
    let (sym, classification) = Symbol::intern(text);
    match classification {
        Classification::Keyword => TokenKind::Ident(sym),
        Classification::ConstIdent => TokenKind::ConstIdent(sym),
        Classification::TypeIdent => TokenKind::TypeIdent(sym),
        Classification::Ident => TokenKind::Ident(sym),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<&'static str> {
        Lexer::new(src).into_tokens().into_iter().map(|t| t.kind.as_str()).collect()
    }

    #[test]
    fn lex_only_scenario_ends_in_eof() {
        assert_eq!(kinds("x := 1;"), vec!["IDENT", "COLON_EQ", "INT_LITERAL", "SEMI", "EOF"]);
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(
            kinds("module hello;"),
            vec!["MODULE", "IDENT", "SEMI", "EOF"]
        );
    }

    #[test]
    fn line_comments_are_skipped() {
        assert_eq!(kinds("// hi\nx;"), vec!["IDENT", "SEMI", "EOF"]);
    }
}
