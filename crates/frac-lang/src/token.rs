//! Tokens produced by the lexer.

use alloc::{string::String, vec::Vec};
use core::fmt;

/// Punctuation and operator tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    Assign,
    Less,
    Greater,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    CaretAssign,
    NotEq,
    EqEq,
    LessEq,
    GreaterEq,
    LParen,
    RParen,
    And,
    Or,
    Semicolon,
    Comma,
}

impl Symbol {
    /// Symbol for a single character.
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '^' => Symbol::Caret,
            '!' => Symbol::Bang,
            '=' => Symbol::Assign,
            '<' => Symbol::Less,
            '>' => Symbol::Greater,
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            '&' => Symbol::And,
            '|' => Symbol::Or,
            ';' => Symbol::Semicolon,
            ',' => Symbol::Comma,
            _ => return None,
        })
    }

    /// Two-character symbol made of `c` followed by `=`.
    pub fn with_eq(c: char) -> Option<Self> {
        Some(match c {
            '+' => Symbol::PlusAssign,
            '-' => Symbol::MinusAssign,
            '*' => Symbol::StarAssign,
            '/' => Symbol::SlashAssign,
            '^' => Symbol::CaretAssign,
            '!' => Symbol::NotEq,
            '=' => Symbol::EqEq,
            '<' => Symbol::LessEq,
            '>' => Symbol::GreaterEq,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Plus => "+",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::Caret => "^",
            Symbol::Bang => "!",
            Symbol::Assign => "=",
            Symbol::Less => "<",
            Symbol::Greater => ">",
            Symbol::PlusAssign => "+=",
            Symbol::MinusAssign => "-=",
            Symbol::StarAssign => "*=",
            Symbol::SlashAssign => "/=",
            Symbol::CaretAssign => "^=",
            Symbol::NotEq => "!=",
            Symbol::EqEq => "==",
            Symbol::LessEq => "<=",
            Symbol::GreaterEq => ">=",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::And => "&",
            Symbol::Or => "|",
            Symbol::Semicolon => ";",
            Symbol::Comma => ",",
        }
    }
}

/// Token category without payload, used in "expected" diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenGroup {
    Eot,
    Eol,
    IndentSame,
    IndentGrow,
    IndentShrink,
    Do,
    While,
    Id,
    Bool,
    Real,
    Imm,
    Symbol(Symbol),
}

impl TokenGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenGroup::Eot => "eot",
            TokenGroup::Eol => "eol",
            TokenGroup::IndentSame => "indent-same",
            TokenGroup::IndentGrow => "indent-grow",
            TokenGroup::IndentShrink => "indent-shrink",
            TokenGroup::Do => "do",
            TokenGroup::While => "while",
            TokenGroup::Id => "id",
            TokenGroup::Bool => "bool",
            TokenGroup::Real => "real",
            TokenGroup::Imm => "imm",
            TokenGroup::Symbol(symbol) => symbol.as_str(),
        }
    }
}

impl fmt::Display for TokenGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Symbol> for TokenGroup {
    fn from(symbol: Symbol) -> Self {
        TokenGroup::Symbol(symbol)
    }
}

/// Token payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// End of text.
    Eot,
    /// End of a non-blank line.
    Eol,
    /// Line start at the current indentation; carries the indent size in columns.
    IndentSame(usize),
    /// Line start deeper than the current indentation.
    IndentGrow(usize),
    /// Line start returning to the enclosing indentation.
    IndentShrink(usize),
    Do,
    While,
    Id(String),
    Bool(bool),
    Real(f64),
    Imm(f64),
    Symbol(Symbol),
}

impl TokenKind {
    pub fn group(&self) -> TokenGroup {
        match self {
            TokenKind::Eot => TokenGroup::Eot,
            TokenKind::Eol => TokenGroup::Eol,
            TokenKind::IndentSame(_) => TokenGroup::IndentSame,
            TokenKind::IndentGrow(_) => TokenGroup::IndentGrow,
            TokenKind::IndentShrink(_) => TokenGroup::IndentShrink,
            TokenKind::Do => TokenGroup::Do,
            TokenKind::While => TokenGroup::While,
            TokenKind::Id(_) => TokenGroup::Id,
            TokenKind::Bool(_) => TokenGroup::Bool,
            TokenKind::Real(_) => TokenGroup::Real,
            TokenKind::Imm(_) => TokenGroup::Imm,
            TokenKind::Symbol(symbol) => TokenGroup::Symbol(*symbol),
        }
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        *self == TokenKind::Symbol(symbol)
    }
}

/// A token with its location in the source.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub pos: usize,
    /// Length in bytes.
    pub len: usize,
}

impl Token {
    pub fn new(kind: TokenKind, pos: usize, len: usize) -> Self {
        Token { kind, pos, len }
    }

    pub fn group(&self) -> TokenGroup {
        self.kind.group()
    }
}

/// Tokens are equal when kind and payload match; location is ignored.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::IndentSame(size)
            | TokenKind::IndentGrow(size)
            | TokenKind::IndentShrink(size) => write!(f, "{}({})", self.group(), size),
            TokenKind::Id(id) => write!(f, "id({})", id),
            TokenKind::Bool(value) => write!(f, "bool({})", value),
            TokenKind::Real(value) => write!(f, "real({})", value),
            TokenKind::Imm(value) => write!(f, "imm({})", value),
            _ => write!(f, "{}", self.group()),
        }
    }
}

/// A tokenized program: the token list (always ending with `Eot`) plus the
/// source text it was read from.
#[derive(Debug, Clone)]
pub struct Tokens {
    source: String,
    tokens: Vec<Token>,
}

impl Tokens {
    pub fn new(source: impl Into<String>, tokens: Vec<Token>) -> Self {
        Tokens {
            source: source.into(),
            tokens,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

/// Sequences compare token by token; source text and locations are ignored.
impl PartialEq for Tokens {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec};

    #[test]
    fn test_equality_ignores_location() {
        let a = Token::new(TokenKind::Id("x".into()), 0, 1);
        let b = Token::new(TokenKind::Id("x".into()), 7, 1);
        let c = Token::new(TokenKind::Id("y".into()), 0, 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(
            Token::new(TokenKind::IndentSame(0), 0, 0),
            Token::new(TokenKind::IndentSame(4), 0, 4)
        );
    }

    #[test]
    fn test_display() {
        let tokens = Tokens::new(
            "x += 1.5",
            vec![
                Token::new(TokenKind::IndentSame(0), 0, 0),
                Token::new(TokenKind::Id("x".into()), 0, 1),
                Token::new(TokenKind::Symbol(Symbol::PlusAssign), 2, 2),
                Token::new(TokenKind::Real(1.5), 5, 3),
                Token::new(TokenKind::Eot, 8, 0),
            ],
        );
        assert_eq!(format!("{}", tokens), "indent-same(0) id(x) += real(1.5) eot");
    }

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(Symbol::from_char(';'), Some(Symbol::Semicolon));
        assert_eq!(Symbol::with_eq('^'), Some(Symbol::CaretAssign));
        assert_eq!(Symbol::with_eq('('), None);
        assert_eq!(Symbol::from_char('#'), None);
    }
}
