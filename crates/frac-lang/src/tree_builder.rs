//! Recursive-descent tree builder.
//!
//! Statement structure (lines, blocks, the `do`/`while` loop) is parsed by
//! recursive descent. Binary expressions use an operator stack and an operand
//! stack: before an operator is pushed, every stacked operator binding at
//! least as tightly is reduced, which makes all binary operators left
//! associative.

use alloc::{boxed::Box, vec, vec::Vec};

use tracing::trace;

use crate::{
    error::{ParseError, ParseResult},
    ops::{AssignOp, BinaryOp, UnaryOp},
    syntax::{Expr, ExprKind, ExprList, Ident, Loop, Root, Span},
    token::{Symbol, Token, TokenGroup, TokenKind, Tokens},
};

const OPERAND_START: [TokenGroup; 8] = [
    TokenGroup::Symbol(Symbol::Plus),
    TokenGroup::Symbol(Symbol::Minus),
    TokenGroup::Symbol(Symbol::Bang),
    TokenGroup::Symbol(Symbol::LParen),
    TokenGroup::Bool,
    TokenGroup::Imm,
    TokenGroup::Real,
    TokenGroup::Id,
];

/// Builds a [`Root`] syntax tree from a token sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    pub fn new() -> Self {
        TreeBuilder
    }

    /// Parse a whole program.
    pub fn build_tree(&self, tokens: &Tokens) -> ParseResult<Root> {
        trace!(tokens = tokens.len(), "building syntax tree");

        if tokens.is_empty() {
            return Err(ParseError::syntax("Missing end of text", tokens.source(), 0));
        }

        Cursor {
            tokens: tokens.as_slice(),
            code: tokens.source(),
            pos: 0,
        }
        .root()
    }
}

struct Cursor<'a> {
    tokens: &'a [Token],
    code: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn current(&self) -> &'a Token {
        self.peek(0)
    }

    /// Token `offset` places ahead; reads past the end yield the final `Eot`.
    fn peek(&self, offset: usize) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn step(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn consume(&mut self) -> &'a Token {
        let token = self.current();
        self.step();
        token
    }

    fn expected(&self, token: &Token, groups: &[TokenGroup]) -> ParseError {
        ParseError::expected(token, self.code, groups)
    }

    fn expect(&mut self, group: TokenGroup) -> ParseResult<&'a Token> {
        let token = self.consume();
        if token.group() != group {
            return Err(self.expected(token, &[group]));
        }
        Ok(token)
    }

    fn root(&mut self) -> ParseResult<Root> {
        let mut init = ExprList::default();

        let main_loop = loop {
            self.expect(TokenGroup::IndentSame)?;

            if self.current().kind == TokenKind::Do {
                break self.parse_loop()?;
            }

            init.extend(self.line()?);
            self.expect(TokenGroup::Eol)?;
        };

        self.expect(TokenGroup::Eot)?;

        Ok(Root {
            source: self.code.into(),
            init,
            main_loop,
        })
    }

    fn parse_loop(&mut self) -> ParseResult<Loop> {
        let do_token = self.expect(TokenGroup::Do)?;
        let body = self.block()?;
        let while_token = self.expect(TokenGroup::While)?;
        let predicate = self.block()?;

        let mut span = Span::of(do_token).to(Span::of(while_token));
        if !predicate.is_empty() {
            span = span.to(predicate.span);
        }

        Ok(Loop {
            body,
            predicate,
            span,
        })
    }

    /// A block is an expression list on the same line, an indented run of
    /// lines, or nothing at all.
    fn block(&mut self) -> ParseResult<ExprList> {
        match self.current().kind {
            TokenKind::Eot => return Ok(ExprList::new(Vec::new(), Span::of(self.current()))),
            TokenKind::Eol => {}
            _ => {
                let list = self.line()?;
                let token = self.consume();
                return match token.kind {
                    TokenKind::Eol => {
                        self.expect(TokenGroup::IndentSame)?;
                        Ok(list)
                    }
                    TokenKind::Eot => Ok(list),
                    _ => Err(self.expected(token, &[TokenGroup::Eol, TokenGroup::Eot])),
                };
            }
        }

        self.step();

        let token = self.consume();
        match token.kind {
            TokenKind::IndentGrow(_) => {}
            TokenKind::IndentSame(_) => return Ok(ExprList::new(Vec::new(), Span::of(token))),
            _ => {
                return Err(self.expected(token, &[TokenGroup::IndentGrow, TokenGroup::IndentSame]))
            }
        }

        let mut list = self.line()?;

        loop {
            let token = self.consume();
            match token.kind {
                TokenKind::Eol => {
                    let token = self.consume();
                    match token.kind {
                        TokenKind::IndentSame(_) => list.extend(self.line()?),
                        TokenKind::IndentShrink(_) => break,
                        _ => {
                            return Err(self.expected(
                                token,
                                &[TokenGroup::IndentSame, TokenGroup::IndentShrink],
                            ))
                        }
                    }
                }
                TokenKind::Eot => break,
                _ => return Err(self.expected(token, &[TokenGroup::Eol, TokenGroup::Eot])),
            }
        }

        Ok(list)
    }

    /// Expressions on one line separated by `;`, with an optional trailing `;`.
    fn line(&mut self) -> ParseResult<ExprList> {
        let first = self.expr()?;
        let mut span = first.span;
        let mut exprs = vec![first];

        while self.current().kind.is_symbol(Symbol::Semicolon) {
            self.step();

            if matches!(self.current().kind, TokenKind::Eol | TokenKind::Eot) {
                break;
            }

            let expr = self.expr()?;
            span = span.to(expr.span);
            exprs.push(expr);
        }

        Ok(ExprList::new(exprs, span))
    }

    fn expr(&mut self) -> ParseResult<Expr> {
        if let TokenKind::Id(name) = &self.current().kind {
            if let TokenKind::Symbol(symbol) = self.peek(1).kind {
                if let Some(op) = AssignOp::from_symbol(symbol) {
                    let target = Ident {
                        name: name.clone(),
                        span: Span::of(self.current()),
                    };
                    self.step();
                    self.step();
                    return self.assign(op, target);
                }
            }
        }

        let lhs = self.operand()?;
        self.binary(lhs)
    }

    fn assign(&mut self, op: AssignOp, target: Ident) -> ParseResult<Expr> {
        let value = self.expr()?;
        let span = target.span.to(value.span);

        Ok(Expr::new(
            ExprKind::Assign {
                op,
                target,
                value: Box::new(value),
            },
            span,
        ))
    }

    /// A single operand: prefix operator, parenthesized expression, literal,
    /// identifier or call.
    fn operand(&mut self) -> ParseResult<Expr> {
        let token = self.consume();
        let span = Span::of(token);

        let kind = match &token.kind {
            TokenKind::Symbol(Symbol::LParen) => return self.sub_expr(token),
            TokenKind::Symbol(symbol) => match UnaryOp::from_symbol(*symbol) {
                Some(op) => return self.unary(op, token),
                None => return Err(self.expected(token, &OPERAND_START)),
            },
            TokenKind::Bool(value) => ExprKind::Bool(*value),
            TokenKind::Real(value) => ExprKind::Real(*value),
            TokenKind::Imm(value) => ExprKind::Imm(*value),
            TokenKind::Id(name) => {
                if self.current().kind.is_symbol(Symbol::LParen) {
                    let callee = Ident {
                        name: name.clone(),
                        span,
                    };
                    return self.call(callee);
                }
                ExprKind::Id(name.clone())
            }
            _ => return Err(self.expected(token, &OPERAND_START)),
        };

        Ok(Expr::new(kind, span))
    }

    fn unary(&mut self, op: UnaryOp, token: &Token) -> ParseResult<Expr> {
        let arg = self.operand()?;
        let span = Span::of(token).to(arg.span);

        Ok(Expr::new(
            ExprKind::Unary {
                op,
                arg: Box::new(arg),
            },
            span,
        ))
    }

    fn sub_expr(&mut self, open: &Token) -> ParseResult<Expr> {
        let inner = self.expr()?;
        let close = self.consume();

        if !close.kind.is_symbol(Symbol::RParen) {
            return Err(self.expected(close, &[TokenGroup::Symbol(Symbol::RParen)]));
        }

        Ok(Expr::new(inner.kind, Span::of(open).to(Span::of(close))))
    }

    fn call(&mut self, callee: Ident) -> ParseResult<Expr> {
        self.step();

        let mut args = Vec::new();

        loop {
            if self.current().kind.is_symbol(Symbol::RParen) {
                let close = self.consume();
                return Ok(make_call(callee, args, close));
            }

            args.push(self.expr()?);

            let token = self.consume();
            match token.kind {
                TokenKind::Symbol(Symbol::Comma) => continue,
                TokenKind::Symbol(Symbol::RParen) => return Ok(make_call(callee, args, token)),
                _ => {
                    return Err(self.expected(
                        token,
                        &[
                            TokenGroup::Symbol(Symbol::Comma),
                            TokenGroup::Symbol(Symbol::RParen),
                        ],
                    ))
                }
            }
        }
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        match self.current().kind {
            TokenKind::Symbol(symbol) => BinaryOp::from_symbol(symbol),
            _ => None,
        }
    }

    fn binary(&mut self, lhs: Expr) -> ParseResult<Expr> {
        let pos = lhs.span.pos;
        let mut ops = Vec::new();
        let mut operands = vec![lhs];

        while let Some(op) = self.binary_op() {
            self.step();
            self.reduce(&mut ops, &mut operands, op.priority(), pos)?;
            operands.push(self.operand()?);
            ops.push(op);
        }

        self.reduce(&mut ops, &mut operands, 0, pos)?;

        match operands.pop() {
            Some(expr) if operands.is_empty() => Ok(expr),
            _ => Err(ParseError::syntax("Bad expression", self.code, pos)),
        }
    }

    /// Fold stacked operators whose priority is at least `until`.
    fn reduce(
        &self,
        ops: &mut Vec<BinaryOp>,
        operands: &mut Vec<Expr>,
        until: u8,
        pos: usize,
    ) -> ParseResult<()> {
        while let Some(&op) = ops.last() {
            if op.priority() < until {
                break;
            }
            ops.pop();

            let (Some(rhs), Some(lhs)) = (operands.pop(), operands.pop()) else {
                return Err(ParseError::syntax("Bad expression", self.code, pos));
            };
            operands.push(Expr::binary(op, lhs, rhs));
        }
        Ok(())
    }
}

fn make_call(callee: Ident, args: Vec<Expr>, close: &Token) -> Expr {
    let span = callee.span.to(Span::of(close));
    Expr::new(ExprKind::Call { callee, args }, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::Tokenizer, ErrorKind};
    use alloc::string::{String, ToString};

    fn build(code: &str) -> ParseResult<Root> {
        let tokens = Tokenizer::new().tokenize(code)?;
        TreeBuilder::new().build_tree(&tokens)
    }

    fn init_line(code: &str) -> String {
        let root = build(&alloc::format!("{}\ndo\nwhile\n  true", code)).unwrap();
        root.init.exprs[0].to_string()
    }

    #[test]
    fn test_program_shape() {
        let root = build("x = 1\ndo\n  x += 1\nwhile\n  x < 10").unwrap();
        assert_eq!(root.init.exprs.len(), 1);
        assert_eq!(root.init.exprs[0].to_string(), "(x = 1)");
        assert_eq!(root.main_loop.body.exprs[0].to_string(), "(x += 1)");
        assert_eq!(root.main_loop.predicate.exprs[0].to_string(), "(x < 10)");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(init_line("a = 1 + 2 * 3 ^ 4"), "(a = (1 + (2 * (3 ^ 4))))");
        assert_eq!(init_line("a = b | c & d == e < f"), "(a = (b | (c & (d == (e < f)))))");
        assert_eq!(init_line("a = 1 * 2 + 3"), "(a = ((1 * 2) + 3))");
    }

    #[test]
    fn test_binary_operators_are_left_associative() {
        assert_eq!(init_line("a = 1 - 2 - 3"), "(a = ((1 - 2) - 3))");
        assert_eq!(init_line("a = 2 ^ 3 ^ 2"), "(a = ((2 ^ 3) ^ 2))");
    }

    #[test]
    fn test_unary_binds_tighter_than_binary() {
        assert_eq!(init_line("a = -x ^ 2"), "(a = (-x ^ 2))");
        assert_eq!(init_line("a = !b & c"), "(a = (!b & c))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(init_line("a = b = 3"), "(a = (b = 3))");
        assert_eq!(init_line("a *= b + 1"), "(a *= (b + 1))");
    }

    #[test]
    fn test_parentheses_and_calls() {
        assert_eq!(init_line("a = (1 + 2) * 3"), "(a = ((1 + 2) * 3))");
        assert_eq!(init_line("a = f(1, g(2i))"), "(a = f(1, g(2i)))");
        assert_eq!(init_line("a = f()"), "(a = f())");
        assert_eq!(init_line("a = mod(z) + 1"), "(a = (mod(z) + 1))");
    }

    #[test]
    fn test_sub_expression_spans_parentheses() {
        let root = build("a = (1 + 2)\ndo\nwhile\n  true").unwrap();
        let ExprKind::Assign { value, .. } = &root.init.exprs[0].kind else {
            panic!("expected assignment");
        };
        assert_eq!(value.span.text(&root.source), "(1 + 2)");
    }

    #[test]
    fn test_semicolon_separated_lines() {
        let root = build("a = 1; b = 2;\ndo a += b\nwhile a < 10").unwrap();
        assert_eq!(root.init.exprs.len(), 2);
        assert_eq!(root.main_loop.body.exprs.len(), 1);
        assert_eq!(root.main_loop.predicate.exprs.len(), 1);
    }

    #[test]
    fn test_multi_line_blocks() {
        let root = build("do\n  a = 1\n  b = 2\nwhile\n  a\n  b").unwrap();
        assert_eq!(root.main_loop.body.exprs.len(), 2);
        assert_eq!(root.main_loop.predicate.exprs.len(), 2);
    }

    #[test]
    fn test_empty_blocks() {
        let root = build("do\nwhile\n  false").unwrap();
        assert!(root.init.is_empty());
        assert!(root.main_loop.body.is_empty());
        assert_eq!(root.main_loop.predicate.exprs[0].to_string(), "false");

        let root = build("do\nwhile").unwrap();
        assert!(root.main_loop.predicate.is_empty());
    }

    #[test]
    fn test_empty_source() {
        let err = build("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(matches!(
            err,
            ParseError::Expected { got: TokenGroup::Eot, .. }
        ));
    }

    #[test]
    fn test_missing_while() {
        let err = build("do\n  x = 1\n").unwrap_err();
        assert_eq!(err.reason(), "Expected: \"while\".\nGot: eot");
    }

    #[test]
    fn test_bad_operand() {
        let err = build("x = )\ndo\nwhile\n  x").unwrap_err();
        match err {
            ParseError::Expected { got, expected, .. } => {
                assert_eq!(got, TokenGroup::Symbol(Symbol::RParen));
                assert!(expected.contains(&TokenGroup::Id));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = build("x = (1 + 2\ndo\nwhile\n  x").unwrap_err();
        assert_eq!(err.reason(), "Expected: \")\".\nGot: eol");
    }

    #[test]
    fn test_assignment_needs_bare_identifier() {
        let err = build("a + b = 1\ndo\nwhile\n  a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.pos(), 6);
    }

    #[test]
    fn test_indented_first_line() {
        let err = build("  x = 1\ndo\nwhile\n  x").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Expected { got: TokenGroup::IndentGrow, .. }
        ));
    }

    #[test]
    fn test_display_round_trip_shape() {
        let root = build("z = 0\ndo\n  z = z ^ 2 + COORD\nwhile\n  mod(z) < 2").unwrap();
        assert_eq!(
            root.to_string(),
            "(z = 0)\ndo\n    (z = ((z ^ 2) + COORD))\nwhile\n    (mod(z) < 2)"
        );
    }
}
