//! Typed semantic tree and the analyzer that produces it.
//!
//! Every expression carries its static [`Type`](crate::Type). Implicit
//! conversions are explicit [`ExprKind::Cast`] nodes; the cast's target type is
//! the type of the cast node itself.

mod analyzer;
mod node;
mod simplify;

pub use analyzer::{AnalyzerOptions, SemanticAnalyzer};
pub use node::{Expr, ExprKind, ExprList, Loop, Root};
pub use simplify::simplify;
