//! Semantic tree nodes.

use alloc::{boxed::Box, format, string::String, vec, vec::Vec};
use core::fmt;

use crate::{
    definition::Definition,
    ops::{AssignOp, BinaryOp, UnaryOp},
    types::Type,
    util::indent,
    TAB_SIZE,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    pub init: ExprList,
    pub main_loop: Loop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub body: ExprList,
    /// Non-empty; the last expression is the bool iteration check.
    pub predicate: ExprList,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprList {
    pub exprs: Vec<Expr>,
}

impl ExprList {
    pub fn new(exprs: Vec<Expr>) -> Self {
        ExprList { exprs }
    }

    /// Type of the last expression, `unit` when empty.
    pub fn ty(&self) -> Type {
        self.exprs.last().map_or(Type::Unit, |expr| expr.ty.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub ty: Type,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Id(Definition),
    Bool(bool),
    Real(f64),
    Imm(f64),
    Assign {
        op: AssignOp,
        target: Definition,
        value: Box<Expr>,
        /// Set on the `=` that introduced the variable.
        first: bool,
    },
    /// Conversion of the operand to this node's type.
    Cast(Box<Expr>),
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
        callee: Definition,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(ty: Type, kind: ExprKind) -> Self {
        Expr { ty, kind }
    }

    pub fn id(definition: Definition) -> Self {
        Expr::new(definition.ty().clone(), ExprKind::Id(definition))
    }

    pub fn bool(value: bool) -> Self {
        Expr::new(Type::Bool, ExprKind::Bool(value))
    }

    /// Real literal; integral values are typed `int`, others `float`.
    pub fn real(value: f64) -> Self {
        let ty = if value % 1.0 == 0.0 {
            Type::Int
        } else {
            Type::Float
        };
        Expr::new(ty, ExprKind::Real(value))
    }

    pub fn imm(value: f64) -> Self {
        Expr::new(Type::Complex, ExprKind::Imm(value))
    }

    pub fn cast(to: Type, arg: Expr) -> Self {
        Expr::new(to, ExprKind::Cast(Box::new(arg)))
    }

    pub fn unary(op: UnaryOp, ty: Type, arg: Expr) -> Self {
        Expr::new(ty, ExprKind::Unary { op, arg: Box::new(arg) })
    }

    pub fn binary(op: BinaryOp, ty: Type, lhs: Expr, rhs: Expr) -> Self {
        Expr::new(
            ty,
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        )
    }

    pub fn assign(op: AssignOp, ty: Type, target: Definition, value: Expr, first: bool) -> Self {
        Expr::new(
            ty,
            ExprKind::Assign {
                op,
                target,
                value: Box::new(value),
                first,
            },
        )
    }

    fn label(&self) -> String {
        match &self.kind {
            ExprKind::Id(definition) => definition.id().into(),
            ExprKind::Bool(value) => format!("{}", value),
            ExprKind::Real(value) => format!("{}", value),
            ExprKind::Imm(value) => format!("{}i", value),
            ExprKind::Assign { op, .. } => op.as_str().into(),
            ExprKind::Cast(_) => "cast".into(),
            ExprKind::Unary { op, .. } => op.as_str().into(),
            ExprKind::Binary { op, .. } => op.as_str().into(),
            ExprKind::Call { .. } => "call".into(),
        }
    }

    fn children(&self) -> Vec<String> {
        match &self.kind {
            ExprKind::Id(_) | ExprKind::Bool(_) | ExprKind::Real(_) | ExprKind::Imm(_) => {
                Vec::new()
            }
            ExprKind::Assign { target, value, .. } => {
                vec![format!("{}", Expr::id(target.clone())), format!("{}", value)]
            }
            ExprKind::Cast(arg) | ExprKind::Unary { arg, .. } => vec![format!("{}", arg)],
            ExprKind::Binary { lhs, rhs, .. } => {
                vec![format!("{}", lhs), format!("{}", rhs)]
            }
            ExprKind::Call { callee, args } => core::iter::once(Expr::id(callee.clone()))
                .chain(args.iter().cloned())
                .map(|expr| format!("{}", expr))
                .collect(),
        }
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, label: &str, ty: &Type, children: &[String]) -> fmt::Result {
    write!(f, "{}: {}", label, ty)?;
    if !children.is_empty() {
        write!(f, "\n{}", indent(&children.join("\n"), TAB_SIZE))?;
    }
    Ok(())
}

/// Prints one node per line as `label: type`, children indented below.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, &self.label(), &self.ty, &self.children())
    }
}

impl fmt::Display for ExprList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children: Vec<String> = self.exprs.iter().map(|expr| format!("{}", expr)).collect();
        write_node(f, ";", &self.ty(), &children)
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

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children = [format!("{}", self.init), format!("{}", self.main_loop)];
        write_node(f, "root", &Type::Unit, &children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_real_literal_typing() {
        assert_eq!(Expr::real(10.0).ty, Type::Int);
        assert_eq!(Expr::real(1.5).ty, Type::Float);
        assert_eq!(Expr::imm(2.0).ty, Type::Complex);
    }

    #[test]
    fn test_list_type_is_last_expr() {
        assert_eq!(ExprList::default().ty(), Type::Unit);
        let list = ExprList::new(vec![Expr::real(1.0), Expr::bool(true)]);
        assert_eq!(list.ty(), Type::Bool);
    }

    #[test]
    fn test_display() {
        let x = Definition::user("x", Type::Int);
        let expr = Expr::assign(AssignOp::Add, Type::Int, x, Expr::cast(Type::Int, Expr::real(1.0)), false);
        assert_eq!(expr.to_string(), "+=: int\n    x: int\n    cast: int\n        1: int");
        assert_eq!(Expr::imm(0.5).to_string(), "0.5i: complex");
    }
}
