//! Syntax tree produced by the [`TreeBuilder`](crate::TreeBuilder).
//!
//! Nodes carry a [`Span`] into the source text held by [`Root`]; no types are
//! attached yet.

use alloc::{boxed::Box, format, string::String, vec::Vec};
use core::fmt;

use crate::{
    ops::{AssignOp, BinaryOp, UnaryOp},
    token::Token,
    util::indent,
    TAB_SIZE,
};

/// Byte range of a node in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub pos: usize,
    pub len: usize,
}

impl Span {
    pub fn new(pos: usize, len: usize) -> Self {
        Span { pos, len }
    }

    pub fn of(token: &Token) -> Self {
        Span::new(token.pos, token.len)
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        let start = self.pos.min(other.pos);
        let end = (self.pos + self.len).max(other.pos + other.len);
        Span::new(start, end - start)
    }

    pub fn end(self) -> usize {
        self.pos + self.len
    }

    /// Source text this span covers.
    pub fn text(self, code: &str) -> &str {
        code.get(self.pos..self.end()).unwrap_or("")
    }
}

/// Whole program: top-level statements followed by the main loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    pub source: String,
    pub init: ExprList,
    pub main_loop: Loop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub body: ExprList,
    pub predicate: ExprList,
    pub span: Span,
}

/// Expressions separated by `;` or newlines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprList {
    pub exprs: Vec<Expr>,
    pub span: Span,
}

impl ExprList {
    pub fn new(exprs: Vec<Expr>, span: Span) -> Self {
        ExprList { exprs, span }
    }

    /// Append another list, widening the span.
    pub fn extend(&mut self, other: ExprList) {
        if other.exprs.is_empty() {
            return;
        }
        self.span = if self.exprs.is_empty() {
            other.span
        } else {
            self.span.to(other.span)
        };
        self.exprs.extend(other.exprs);
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Identifier occurrence used as an assignment target or callee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Id(String),
    Bool(bool),
    Real(f64),
    Imm(f64),
    Assign {
        op: AssignOp,
        target: Ident,
        value: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        arg: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        callee: Ident,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Build a binary node spanning both operands.
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        let span = lhs.span.to(rhs.span);
        Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.init.is_empty() {
            writeln!(f, "{}", self.init)?;
        }
        write!(f, "{}", self.main_loop)
    }
}

impl fmt::Display for Loop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "do")?;
        writeln!(f, "{}", indent(&format!("{}", self.body), TAB_SIZE))?;
        writeln!(f, "while")?;
        write!(f, "{}", indent(&format!("{}", self.predicate), TAB_SIZE))
    }
}

impl fmt::Display for ExprList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, expr) in self.exprs.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", expr)?;
        }
        Ok(())
    }
}

/// Prints expressions fully parenthesized, e.g. `(a + (b * c))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Id(id) => write!(f, "{}", id),
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::Real(value) => write!(f, "{}", value),
            ExprKind::Imm(value) => write!(f, "{}i", value),
            ExprKind::Assign { op, target, value } => {
                write!(f, "({} {} {})", target.name, op, value)
            }
            ExprKind::Unary { op, arg } => {
                let prefix = match op {
                    UnaryOp::Not => "!",
                    UnaryOp::Pos => "+",
                    UnaryOp::Neg => "-",
                };
                write!(f, "{}{}", prefix, arg)
            }
            ExprKind::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op, rhs),
            ExprKind::Call { callee, args } => {
                write!(f, "{}(", callee.name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
