//! Semantic analysis: name resolution, typing and implicit cast insertion.

use alloc::{format, string::String, vec::Vec};

use tracing::trace;

use super::{
    node::{Expr, ExprList, Loop, Root},
    simplify::simplify,
};
use crate::{
    builtins,
    definition::{Definition, Definitions},
    error::{ParseError, ParseResult},
    ops::{AssignOp, BinaryClass, BinaryOp, UnaryOp},
    syntax::{self, Ident, Span},
    types::Type,
};

/// Configuration for [`SemanticAnalyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Identifiers visible before the program defines anything.
    pub definitions: Definitions,
    /// Remove casts whose operand already has the target type.
    pub simplify: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            definitions: builtins::default_definitions(),
            simplify: true,
        }
    }
}

/// Turns a syntax tree into a typed semantic tree.
///
/// The analyzer itself is immutable; each run works on a private copy of the
/// definition table, so user variables never leak between runs.
#[derive(Debug, Clone, Default)]
pub struct SemanticAnalyzer {
    options: AnalyzerOptions,
}

impl SemanticAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        SemanticAnalyzer { options }
    }

    pub fn definitions(&self) -> &Definitions {
        &self.options.definitions
    }

    pub fn simplifies(&self) -> bool {
        self.options.simplify
    }

    /// Analyze a whole program.
    pub fn analyze_semantic(&self, tree: &syntax::Root) -> ParseResult<Root> {
        trace!(simplify = self.options.simplify, "analyzing semantic tree");

        let mut analysis = Analysis {
            code: &tree.source,
            definitions: self.options.definitions.clone(),
        };
        let root = analysis.root(tree)?;

        Ok(if self.options.simplify {
            simplify(root)
        } else {
            root
        })
    }
}

fn cannot_cast(from: &Type, to: &Type) -> String {
    format!(
        "Expression of type {} cannot be implicitly casted to {}",
        from, to
    )
}

fn cannot_be_arg(op: &str, ty: &Type) -> String {
    format!("Value of type {} cannot be an argument of {}", ty, op)
}

fn bad_complex_power() -> String {
    format!(
        "Value of type {} can only be raised to a power implicitly castable to {} type",
        Type::Complex,
        Type::Int
    )
}

/// Per-run state.
struct Analysis<'a> {
    code: &'a str,
    definitions: Definitions,
}

impl<'a> Analysis<'a> {
    fn error(&self, reason: impl Into<String>, span: Span) -> ParseError {
        ParseError::semantic(reason, self.code, span.pos)
    }

    fn root(&mut self, tree: &syntax::Root) -> ParseResult<Root> {
        let init = self.list(&tree.init)?;
        let main_loop = self.main_loop(&tree.main_loop)?;
        Ok(Root { init, main_loop })
    }

    fn main_loop(&mut self, tree: &syntax::Loop) -> ParseResult<Loop> {
        let body = self.list(&tree.body)?;
        let mut predicate = self.list(&tree.predicate)?;

        let (Some(last), Some(last_syntax)) = (predicate.exprs.pop(), tree.predicate.exprs.last())
        else {
            return Err(self.error("Loop predicate is empty", tree.predicate.span));
        };

        let check = self.cast(last, Type::Bool, last_syntax.span)?;
        predicate.exprs.push(check);

        Ok(Loop { body, predicate })
    }

    fn list(&mut self, list: &syntax::ExprList) -> ParseResult<ExprList> {
        let exprs = list
            .exprs
            .iter()
            .map(|expr| self.expr(expr))
            .collect::<ParseResult<Vec<_>>>()?;
        Ok(ExprList::new(exprs))
    }

    /// Wrap `expr` in a cast to `to`, failing when the conversion isn't implicit.
    fn cast(&self, expr: Expr, to: Type, span: Span) -> ParseResult<Expr> {
        if !expr.ty.is_castable_to(&to) {
            return Err(self.error(cannot_cast(&expr.ty, &to), span));
        }
        Ok(Expr::cast(to, expr))
    }

    /// Analyze an operand that must be numeric; `bool` is promoted to `int`
    /// when `promote_bool` is set.
    fn numeric(&mut self, op: &str, tree: &syntax::Expr, promote_bool: bool) -> ParseResult<Expr> {
        let expr = self.expr(tree)?;

        if !expr.ty.is_numeric() {
            return Err(self.error(cannot_be_arg(op, &expr.ty), tree.span));
        }

        Ok(if promote_bool && expr.ty.is_bool() {
            Expr::cast(Type::Int, expr)
        } else {
            expr
        })
    }

    fn expr(&mut self, tree: &syntax::Expr) -> ParseResult<Expr> {
        use syntax::ExprKind;

        match &tree.kind {
            ExprKind::Id(name) => Ok(Expr::id(self.lookup(name, tree.span)?)),
            ExprKind::Bool(value) => Ok(Expr::bool(*value)),
            ExprKind::Real(value) => Ok(Expr::real(*value)),
            ExprKind::Imm(value) => Ok(Expr::imm(*value)),
            ExprKind::Assign {
                op: AssignOp::Init,
                target,
                value,
            } => self.init(tree, target, value),
            ExprKind::Assign { op, target, value } => self.modify(*op, target, value),
            ExprKind::Unary {
                op: UnaryOp::Not,
                arg,
            } => {
                let arg_expr = self.expr(arg)?;
                let arg_expr = self.cast(arg_expr, Type::Bool, arg.span)?;
                Ok(Expr::unary(UnaryOp::Not, Type::Bool, arg_expr))
            }
            ExprKind::Unary { op, arg } => {
                let arg = self.numeric(op.as_str(), arg, true)?;
                let ty = arg.ty.clone();
                Ok(Expr::unary(*op, ty, arg))
            }
            ExprKind::Binary { op, lhs, rhs } => self.binary(*op, lhs, rhs),
            ExprKind::Call { callee, args } => self.call(callee, args),
        }
    }

    fn lookup(&self, name: &str, span: Span) -> ParseResult<Definition> {
        self.definitions
            .get(name)
            .cloned()
            .ok_or_else(|| self.error(format!("{} is undefined", name), span))
    }

    /// `id = value`. The first assignment defines the variable with the
    /// value's type; later ones cast the value to that type.
    fn init(
        &mut self,
        tree: &syntax::Expr,
        target: &Ident,
        value_tree: &syntax::Expr,
    ) -> ParseResult<Expr> {
        let value = self.expr(value_tree)?;

        if !value.ty.is_numeric() {
            return Err(self.error(
                format!(
                    "Assignment of value of type {} is not allowed.\nValue must be of numeric type",
                    value.ty
                ),
                value_tree.span,
            ));
        }

        match self.definitions.get(&target.name).cloned() {
            None => {
                let definition = Definition::user(target.name.clone(), value.ty.clone());
                self.definitions
                    .insert(target.name.clone(), definition.clone());
                let ty = value.ty.clone();
                Ok(Expr::assign(AssignOp::Init, ty, definition, value, true))
            }
            Some(definition) => {
                if definition.is_builtin() {
                    return Err(self.error(
                        "Modification of built-in values/functions isn't allowed",
                        tree.span,
                    ));
                }

                let ty = definition.ty().clone();
                let value = self.cast(value, ty.clone(), value_tree.span)?;
                Ok(Expr::assign(AssignOp::Init, ty, definition, value, false))
            }
        }
    }

    /// Compound assignment on an existing numeric variable.
    fn modify(
        &mut self,
        op: AssignOp,
        target: &Ident,
        value_tree: &syntax::Expr,
    ) -> ParseResult<Expr> {
        let definition = self.lookup(&target.name, target.span)?;

        if definition.is_builtin() {
            return Err(self.error(
                "Modification of built-in values/functions isn't allowed",
                target.span,
            ));
        }

        let ty = definition.ty().clone();
        if !ty.is_numeric() {
            return Err(self.error(cannot_be_arg(op.as_str(), &ty), target.span));
        }

        let value = self.numeric(op.as_str(), value_tree, false)?;

        if op == AssignOp::Pow && ty.is_complex() {
            if !value.ty.is_castable_to(&Type::Int) {
                return Err(self.error(bad_complex_power(), value_tree.span));
            }
            let value = Expr::cast(Type::Int, value);
            return Ok(Expr::assign(op, Type::Complex, definition, value, false));
        }

        let value = self.cast(value, ty.clone(), value_tree.span)?;
        Ok(Expr::assign(op, ty, definition, value, false))
    }

    fn binary(
        &mut self,
        op: BinaryOp,
        lhs_tree: &syntax::Expr,
        rhs_tree: &syntax::Expr,
    ) -> ParseResult<Expr> {
        match op.class() {
            BinaryClass::Logic => {
                let lhs = self.expr(lhs_tree)?;
                let lhs = self.cast(lhs, Type::Bool, lhs_tree.span)?;
                let rhs = self.expr(rhs_tree)?;
                let rhs = self.cast(rhs, Type::Bool, rhs_tree.span)?;
                Ok(Expr::binary(op, Type::Bool, lhs, rhs))
            }
            BinaryClass::Eq => {
                let lhs = self.numeric(op.as_str(), lhs_tree, false)?;
                let rhs = self.numeric(op.as_str(), rhs_tree, false)?;
                let common = lhs.ty.common(&rhs.ty);
                Ok(Expr::binary(
                    op,
                    Type::Bool,
                    Expr::cast(common.clone(), lhs),
                    Expr::cast(common, rhs),
                ))
            }
            BinaryClass::Cmp => {
                let lhs = self.comparable(op, lhs_tree)?;
                let rhs = self.comparable(op, rhs_tree)?;
                let common = lhs.ty.common(&rhs.ty);
                Ok(Expr::binary(
                    op,
                    Type::Bool,
                    Expr::cast(common.clone(), lhs),
                    Expr::cast(common, rhs),
                ))
            }
            BinaryClass::Arith => {
                let lhs = self.numeric(op.as_str(), lhs_tree, true)?;
                let rhs = self.numeric(op.as_str(), rhs_tree, true)?;

                if op == BinaryOp::Pow && lhs.ty.is_complex() {
                    if !rhs.ty.is_castable_to(&Type::Int) {
                        return Err(self.error(bad_complex_power(), rhs_tree.span));
                    }
                    return Ok(Expr::binary(
                        op,
                        Type::Complex,
                        lhs,
                        Expr::cast(Type::Int, rhs),
                    ));
                }

                let common = lhs.ty.common(&rhs.ty);
                Ok(Expr::binary(
                    op,
                    common.clone(),
                    Expr::cast(common.clone(), lhs),
                    Expr::cast(common, rhs),
                ))
            }
        }
    }

    /// Operand of an ordering comparison: numeric, not complex, bool promoted to int.
    fn comparable(&mut self, op: BinaryOp, tree: &syntax::Expr) -> ParseResult<Expr> {
        let expr = self.numeric(op.as_str(), tree, true)?;
        if expr.ty.is_complex() {
            return Err(self.error(cannot_be_arg(op.as_str(), &expr.ty), tree.span));
        }
        Ok(expr)
    }

    fn call(&mut self, callee: &Ident, arg_trees: &[syntax::Expr]) -> ParseResult<Expr> {
        let definition = self.lookup(&callee.name, callee.span)?;

        let Type::Function(signature) = definition.ty().clone() else {
            return Err(self.error(format!("{} is not a function", callee.name), callee.span));
        };

        let args = arg_trees
            .iter()
            .map(|arg| self.expr(arg))
            .collect::<ParseResult<Vec<_>>>()?;

        if args.len() != signature.arg_types.len() {
            return Err(self.error(
                format!(
                    "{} requires {} argument(s) but {} was/were provided",
                    callee.name,
                    signature.arg_types.len(),
                    args.len()
                ),
                callee.span,
            ));
        }

        let args = args
            .into_iter()
            .zip(arg_trees)
            .zip(&signature.arg_types)
            .map(|((arg, tree), ty)| self.cast(arg, ty.clone(), tree.span))
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(Expr::new(
            (*signature.return_type).clone(),
            super::ExprKind::Call {
                callee: definition,
                args,
            },
        ))
    }
}
