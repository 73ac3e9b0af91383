//! Identity-cast elimination.

use alloc::boxed::Box;

use super::node::{Expr, ExprKind, ExprList, Loop, Root};

/// Remove every cast whose operand already has the cast's type.
///
/// Operands are simplified first, so nested identity casts collapse fully.
/// Applying the pass twice gives the same tree as applying it once.
pub fn simplify(root: Root) -> Root {
    Root {
        init: simplify_list(root.init),
        main_loop: Loop {
            body: simplify_list(root.main_loop.body),
            predicate: simplify_list(root.main_loop.predicate),
        },
    }
}

fn simplify_list(list: ExprList) -> ExprList {
    ExprList::new(list.exprs.into_iter().map(simplify_expr).collect())
}

fn boxed(expr: Box<Expr>) -> Box<Expr> {
    Box::new(simplify_expr(*expr))
}

fn simplify_expr(expr: Expr) -> Expr {
    let Expr { ty, kind } = expr;

    let kind = match kind {
        ExprKind::Cast(arg) => {
            let arg = simplify_expr(*arg);
            if arg.ty == ty {
                return arg;
            }
            ExprKind::Cast(Box::new(arg))
        }
        ExprKind::Assign {
            op,
            target,
            value,
            first,
        } => ExprKind::Assign {
            op,
            target,
            value: boxed(value),
            first,
        },
        ExprKind::Unary { op, arg } => ExprKind::Unary { op, arg: boxed(arg) },
        ExprKind::Binary { op, lhs, rhs } => ExprKind::Binary {
            op,
            lhs: boxed(lhs),
            rhs: boxed(rhs),
        },
        ExprKind::Call { callee, args } => ExprKind::Call {
            callee,
            args: args.into_iter().map(simplify_expr).collect(),
        },
        leaf @ (ExprKind::Id(_) | ExprKind::Bool(_) | ExprKind::Real(_) | ExprKind::Imm(_)) => {
            leaf
        }
    };

    Expr { ty, kind }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ops::BinaryOp, types::Type};
    use alloc::vec;

    fn root_with(expr: Expr) -> Root {
        Root {
            init: ExprList::new(vec![expr]),
            main_loop: Loop {
                body: ExprList::default(),
                predicate: ExprList::new(vec![Expr::bool(true)]),
            },
        }
    }

    #[test]
    fn test_nested_identity_casts_collapse() {
        let expr = Expr::cast(Type::Int, Expr::cast(Type::Int, Expr::real(1.0)));
        let root = simplify(root_with(expr));
        assert_eq!(root.init.exprs[0], Expr::real(1.0));
    }

    #[test]
    fn test_widening_cast_is_kept() {
        let expr = Expr::cast(Type::Float, Expr::cast(Type::Int, Expr::real(1.0)));
        let root = simplify(root_with(expr));
        assert_eq!(root.init.exprs[0], Expr::cast(Type::Float, Expr::real(1.0)));
    }

    #[test]
    fn test_idempotent() {
        let expr = Expr::binary(
            BinaryOp::Add,
            Type::Float,
            Expr::cast(Type::Float, Expr::real(1.0)),
            Expr::cast(Type::Float, Expr::cast(Type::Float, Expr::real(2.5))),
        );
        let once = simplify(root_with(expr));
        let twice = simplify(once.clone());
        assert_eq!(once, twice);
    }
}
