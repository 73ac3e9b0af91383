//! Operators shared by the syntax and semantic trees.

use core::fmt;

use crate::token::Symbol;

/// `=` and the compound assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Init,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl AssignOp {
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        Some(match symbol {
            Symbol::Assign => AssignOp::Init,
            Symbol::PlusAssign => AssignOp::Add,
            Symbol::MinusAssign => AssignOp::Sub,
            Symbol::StarAssign => AssignOp::Mul,
            Symbol::SlashAssign => AssignOp::Div,
            Symbol::CaretAssign => AssignOp::Pow,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssignOp::Init => "=",
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Pow => "^=",
        }
    }

    /// The arithmetic operator a compound assignment applies.
    pub fn binary(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Init => None,
            AssignOp::Add => Some(BinaryOp::Add),
            AssignOp::Sub => Some(BinaryOp::Sub),
            AssignOp::Mul => Some(BinaryOp::Mul),
            AssignOp::Div => Some(BinaryOp::Div),
            AssignOp::Pow => Some(BinaryOp::Pow),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    /// Prefix `+`, which yields the absolute value.
    Pos,
    Neg,
}

impl UnaryOp {
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        Some(match symbol {
            Symbol::Bang => UnaryOp::Not,
            Symbol::Plus => UnaryOp::Pos,
            Symbol::Minus => UnaryOp::Neg,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Pos => "pos",
            UnaryOp::Neg => "neg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Less,
    LessOrEq,
    Greater,
    GreaterOrEq,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// How a binary operator types its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryClass {
    Logic,
    Eq,
    Cmp,
    Arith,
}

impl BinaryOp {
    pub fn from_symbol(symbol: Symbol) -> Option<Self> {
        Some(match symbol {
            Symbol::Or => BinaryOp::Or,
            Symbol::And => BinaryOp::And,
            Symbol::EqEq => BinaryOp::Eq,
            Symbol::NotEq => BinaryOp::NotEq,
            Symbol::Less => BinaryOp::Less,
            Symbol::LessEq => BinaryOp::LessOrEq,
            Symbol::Greater => BinaryOp::Greater,
            Symbol::GreaterEq => BinaryOp::GreaterOrEq,
            Symbol::Plus => BinaryOp::Add,
            Symbol::Minus => BinaryOp::Sub,
            Symbol::Star => BinaryOp::Mul,
            Symbol::Slash => BinaryOp::Div,
            Symbol::Caret => BinaryOp::Pow,
            _ => return None,
        })
    }

    /// Binding strength; higher binds tighter.
    pub fn priority(self) -> u8 {
        match self {
            BinaryOp::Or => 0,
            BinaryOp::And => 1,
            BinaryOp::Eq | BinaryOp::NotEq => 2,
            BinaryOp::Less | BinaryOp::LessOrEq | BinaryOp::Greater | BinaryOp::GreaterOrEq => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div => 5,
            BinaryOp::Pow => 6,
        }
    }

    pub fn class(self) -> BinaryClass {
        match self {
            BinaryOp::Or | BinaryOp::And => BinaryClass::Logic,
            BinaryOp::Eq | BinaryOp::NotEq => BinaryClass::Eq,
            BinaryOp::Less | BinaryOp::LessOrEq | BinaryOp::Greater | BinaryOp::GreaterOrEq => {
                BinaryClass::Cmp
            }
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Pow => {
                BinaryClass::Arith
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "|",
            BinaryOp::And => "&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessOrEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterOrEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    /// GLSL spelling. Logic operators map to their short-circuit forms.
    pub fn glsl(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
