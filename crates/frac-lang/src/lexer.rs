//! Tokenizer.
//!
//! Converts source text into a [`Tokens`] sequence. Indentation is significant:
//! every non-blank line starts with an indent token that says whether the line
//! is deeper than, level with, or back out of the enclosing block.

use alloc::{string::ToString, vec, vec::Vec};

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize},
    sequence::pair,
    IResult,
};

use crate::{
    error::{ParseError, ParseResult},
    token::{Symbol, Token, TokenKind, Tokens},
    TAB_SIZE,
};

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_id_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_id_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Spaces and tabs, optionally followed by one newline.
fn blank(input: &str) -> IResult<&str, (&str, bool)> {
    let (rest, spaces) = take_while(is_blank)(input)?;
    let (rest, newline) = opt(char('\n'))(rest)?;
    Ok((rest, (spaces, newline.is_some())))
}

/// `(\d+(\.\d+)?|\.\d+)` parsed to a float, plus whether an `i` suffix follows.
fn number(input: &str) -> IResult<&str, (f64, bool)> {
    let (rest, value) = map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
        |digits: &str| digits.parse::<f64>(),
    )(input)?;
    let (rest, imaginary) = opt(char('i'))(rest)?;
    Ok((rest, (value, imaginary.is_some())))
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(take_while1(is_id_start), take_while(is_id_continue)))(input)
}

fn indent_size(spaces: &str) -> usize {
    spaces
        .chars()
        .map(|c| if c == '\t' { TAB_SIZE } else { 1 })
        .sum()
}

/// Stateless tokenizer; each call to [`Tokenizer::tokenize`] starts fresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer
    }

    /// Tokenize `code`. The result always ends with a single `Eot` token.
    pub fn tokenize(&self, code: &str) -> ParseResult<Tokens> {
        Lexer::new(code).run()
    }
}

struct Lexer<'a> {
    code: &'a str,
    pos: usize,
    in_line: bool,
    indents: Vec<usize>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(code: &'a str) -> Self {
        Lexer {
            code,
            pos: 0,
            in_line: false,
            indents: vec![0],
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.code[self.pos..]
    }

    fn push(&mut self, kind: TokenKind, pos: usize, len: usize) {
        self.tokens.push(Token::new(kind, pos, len));
    }

    fn run(mut self) -> ParseResult<Tokens> {
        while self.pos < self.code.len() {
            let (rest, (spaces, newline)) = blank(self.rest())
                .map_err(|_| ParseError::lexical("Illegal character", self.code, self.pos))?;
            let skipped = self.rest().len() - rest.len();
            self.pos += skipped;

            if newline {
                if self.in_line {
                    self.push(TokenKind::Eol, self.pos - 1, 1);
                    self.in_line = false;
                }
                continue;
            }

            if self.pos >= self.code.len() {
                break;
            }

            if !self.in_line {
                self.indent(indent_size(spaces), skipped)?;
                self.in_line = true;
            }

            self.token()?;
        }

        if matches!(self.tokens.last(), Some(token) if token.kind == TokenKind::Eol) {
            self.tokens.pop();
        }

        let end = self.code.len();
        self.push(TokenKind::Eot, end, 0);

        Ok(Tokens::new(self.code.to_string(), self.tokens))
    }

    fn indent(&mut self, size: usize, len: usize) -> ParseResult<()> {
        let current = self.indents.last().copied().unwrap_or(0);

        let kind = if size > current {
            self.indents.push(size);
            TokenKind::IndentGrow(size)
        } else if size < current {
            let enclosing = self.indents.len().checked_sub(2).map(|i| self.indents[i]);
            if enclosing != Some(size) {
                return Err(ParseError::lexical("Indent mismatch", self.code, self.pos));
            }
            self.indents.pop();
            TokenKind::IndentShrink(size)
        } else {
            TokenKind::IndentSame(size)
        };

        self.push(kind, self.pos, len);
        Ok(())
    }

    fn token(&mut self) -> ParseResult<()> {
        let start = self.pos;
        let rest = self.rest();
        let mut chars = rest.chars();
        let Some(c) = chars.next() else {
            return Ok(());
        };

        if chars.next() == Some('=') {
            if let Some(symbol) = Symbol::with_eq(c) {
                self.push(TokenKind::Symbol(symbol), start, 2);
                self.pos += 2;
                return Ok(());
            }
        }

        if let Some(symbol) = Symbol::from_char(c) {
            self.push(TokenKind::Symbol(symbol), start, 1);
            self.pos += 1;
            return Ok(());
        }

        if c == '.' || c.is_ascii_digit() {
            return self.number();
        }

        let (after, id) = identifier(rest)
            .map_err(|_| ParseError::lexical("Illegal character", self.code, start))?;
        let kind = match id {
            "do" => TokenKind::Do,
            "while" => TokenKind::While,
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            _ => TokenKind::Id(id.to_string()),
        };
        let len = rest.len() - after.len();
        self.push(kind, start, len);
        self.pos += len;
        Ok(())
    }

    fn number(&mut self) -> ParseResult<()> {
        let start = self.pos;
        let rest = self.rest();
        let expected = || ParseError::lexical("Expected number", self.code, start);

        let (after, (value, imaginary)) = number(rest).map_err(|_| expected())?;
        if after.starts_with(is_id_start) {
            return Err(expected());
        }

        let kind = if imaginary {
            TokenKind::Imm(value)
        } else {
            TokenKind::Real(value)
        };
        let len = rest.len() - after.len();
        self.push(kind, start, len);
        self.pos += len;
        Ok(())
    }
}
