//! Static types of the language.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// A static type.
///
/// Value kinds are ordered by precedence: `unit < bool < int < float < complex`.
/// Function types sit outside that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Unit,
    Bool,
    Int,
    Float,
    Complex,
    Function(FunctionType),
}

/// Signature of a callable definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub arg_types: Vec<Type>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn new(arg_types: Vec<Type>, return_type: Type) -> Self {
        FunctionType {
            arg_types,
            return_type: Box::new(return_type),
        }
    }
}

impl Type {
    /// Build a function type.
    pub fn function(arg_types: Vec<Type>, return_type: Type) -> Self {
        Type::Function(FunctionType::new(arg_types, return_type))
    }

    /// Position in the value-kind order, `None` for function types.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Type::Unit => Some(0),
            Type::Bool => Some(1),
            Type::Int => Some(2),
            Type::Float => Some(3),
            Type::Complex => Some(4),
            Type::Function(_) => None,
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Unit)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float)
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Type::Complex)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Type::Function(_))
    }

    /// True for `bool`, `int`, `float` and `complex`.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Bool | Type::Int | Type::Float | Type::Complex)
    }

    /// Whether a value of this type may be implicitly converted to `to`.
    ///
    /// Anything except `unit` converts to `bool`. Otherwise conversion only
    /// widens along the precedence order.
    pub fn is_castable_to(&self, to: &Type) -> bool {
        if self == to {
            return true;
        }

        if self.is_unit() || to.is_unit() {
            return false;
        }

        if to.is_bool() {
            return true;
        }

        match (self.precedence(), to.precedence()) {
            (Some(from), Some(to)) => from <= to,
            _ => false,
        }
    }

    /// Whether two types can meet in one operation.
    pub fn are_compatible(&self, other: &Type) -> bool {
        if self == other {
            return true;
        }

        if self.is_unit() || other.is_unit() {
            return false;
        }

        if self.is_bool() || other.is_bool() {
            return true;
        }

        !self.is_function() && !other.is_function()
    }

    /// The higher-precedence of two types; `self` wins ties.
    pub fn common(&self, other: &Type) -> Type {
        if other.precedence() > self.precedence() {
            other.clone()
        } else {
            self.clone()
        }
    }

    /// GLSL spelling of a value type, `None` for function types.
    pub fn glsl_name(&self) -> Option<&'static str> {
        match self {
            Type::Unit => Some("void"),
            Type::Bool => Some("bool"),
            Type::Int => Some("int"),
            Type::Float => Some("float"),
            Type::Complex => Some("vec2"),
            Type::Function(_) => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unit => write!(f, "unit"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::Complex => write!(f, "complex"),
            Type::Function(func) => write!(f, "{}", func),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, arg) in self.arg_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, vec};

    const VALUES: [Type; 5] = [Type::Unit, Type::Bool, Type::Int, Type::Float, Type::Complex];

    #[test]
    fn test_castable_widens_only() {
        assert!(Type::Int.is_castable_to(&Type::Float));
        assert!(Type::Float.is_castable_to(&Type::Complex));
        assert!(Type::Bool.is_castable_to(&Type::Int));
        assert!(!Type::Complex.is_castable_to(&Type::Int));
        assert!(!Type::Float.is_castable_to(&Type::Int));
    }

    #[test]
    fn test_everything_but_unit_casts_to_bool() {
        assert!(Type::Complex.is_castable_to(&Type::Bool));
        assert!(Type::function(vec![Type::Float], Type::Float).is_castable_to(&Type::Bool));
        assert!(!Type::Unit.is_castable_to(&Type::Bool));
        assert!(!Type::Bool.is_castable_to(&Type::Unit));
    }

    #[test]
    fn test_functions_never_cast_to_values() {
        let sin = Type::function(vec![Type::Float], Type::Float);
        assert!(!sin.is_castable_to(&Type::Float));
        assert!(!Type::Float.is_castable_to(&sin));
        assert!(sin.is_castable_to(&sin));
    }

    #[test]
    fn test_common_is_symmetric_and_castable() {
        for a in VALUES.iter().skip(1) {
            for b in VALUES.iter().skip(1) {
                let c = a.common(b);
                assert_eq!(c, b.common(a));
                assert!(a.is_castable_to(&c), "{} -> {}", a, c);
                assert!(b.is_castable_to(&c), "{} -> {}", b, c);
            }
        }
    }

    #[test]
    fn test_compatibility() {
        let sin = Type::function(vec![Type::Float], Type::Float);
        assert!(Type::Bool.are_compatible(&sin));
        assert!(!Type::Int.are_compatible(&sin));
        assert!(!Type::Unit.are_compatible(&Type::Int));
        assert!(Type::Int.are_compatible(&Type::Complex));
    }

    #[test]
    fn test_numeric() {
        assert!(!Type::Unit.is_numeric());
        assert!(Type::Bool.is_numeric());
        assert!(Type::Complex.is_numeric());
        assert!(!Type::function(vec![], Type::Unit).is_numeric());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Type::Complex), "complex");
        assert_eq!(
            format!("{}", Type::function(vec![Type::Complex, Type::Int], Type::Complex)),
            "(complex, int) -> complex"
        );
        assert_eq!(Type::Complex.glsl_name(), Some("vec2"));
        assert_eq!(Type::Unit.glsl_name(), Some("void"));
    }
}
