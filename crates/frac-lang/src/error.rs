//! Errors raised while turning source text into a semantic tree.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt;

use thiserror::Error;

use crate::{
    token::{Token, TokenGroup},
    util::{expand_tabs, line_info},
    TAB_SIZE,
};

/// Result type for the front end stages.
pub type ParseResult<T> = Result<T, ParseError>;

/// Stage that rejected the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "Lexical",
            ErrorKind::Syntax => "Syntax",
            ErrorKind::Semantic => "Semantic",
        }
    }
}

/// Where and why a program was rejected.
///
/// `Display` renders the offending line with a caret under `pos`:
///
/// ```text
/// Semantic error in line: "  y = z"
///                                ^
/// z is undefined
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub reason: String,
    /// Full source text of the program.
    pub code: String,
    /// Byte offset of the offending token or node.
    pub pos: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = format!("{} error in line: ", self.kind.label());
        let line = line_info(&self.code, self.pos);
        let tabs = line.text.chars().take(line.column).filter(|&c| c == '\t').count();
        // +1 skips the opening quote
        let offset = prefix.len() + line.column + (TAB_SIZE - 1) * tabs + 1;

        writeln!(f, "{}\"{}\"", prefix, expand_tabs(line.text))?;
        writeln!(f, "{:offset$}^", "", offset = offset)?;
        write!(f, "{}", self.reason)
    }
}

/// Error produced by the tokenizer, tree builder or semantic analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{0}")]
    Lexical(Diagnostic),
    #[error("{0}")]
    Syntax(Diagnostic),
    /// Syntax error where the set of acceptable tokens is known.
    #[error("{diagnostic}")]
    Expected {
        diagnostic: Diagnostic,
        got: TokenGroup,
        expected: Vec<TokenGroup>,
    },
    #[error("{0}")]
    Semantic(Diagnostic),
}

fn diagnostic(kind: ErrorKind, reason: impl Into<String>, code: &str, pos: usize) -> Diagnostic {
    Diagnostic {
        kind,
        reason: reason.into(),
        code: code.to_string(),
        pos,
    }
}

impl ParseError {
    /// Create a new lexical error.
    pub fn lexical(reason: impl Into<String>, code: &str, pos: usize) -> Self {
        ParseError::Lexical(diagnostic(ErrorKind::Lexical, reason, code, pos))
    }

    /// Create a new syntax error.
    pub fn syntax(reason: impl Into<String>, code: &str, pos: usize) -> Self {
        ParseError::Syntax(diagnostic(ErrorKind::Syntax, reason, code, pos))
    }

    /// Create a new semantic error.
    pub fn semantic(reason: impl Into<String>, code: &str, pos: usize) -> Self {
        ParseError::Semantic(diagnostic(ErrorKind::Semantic, reason, code, pos))
    }

    /// Create a syntax error listing the token groups that would have been accepted.
    pub fn expected(got: &Token, code: &str, expected: &[TokenGroup]) -> Self {
        let mut expected = expected.to_vec();
        expected.sort_by_key(|group| group.as_str());
        expected.dedup();

        let list = expected
            .iter()
            .map(|group| format!("\"{}\"", group))
            .collect::<Vec<_>>()
            .join(", ");
        let reason = format!("Expected: {}.\nGot: {}", list, got.group());

        ParseError::Expected {
            diagnostic: diagnostic(ErrorKind::Syntax, reason, code, got.pos),
            got: got.group(),
            expected,
        }
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            ParseError::Lexical(diagnostic)
            | ParseError::Syntax(diagnostic)
            | ParseError::Semantic(diagnostic)
            | ParseError::Expected { diagnostic, .. } => diagnostic,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.diagnostic().kind
    }

    pub fn reason(&self) -> &str {
        &self.diagnostic().reason
    }

    pub fn code(&self) -> &str {
        &self.diagnostic().code
    }

    pub fn pos(&self) -> usize {
        self.diagnostic().pos
    }
}
