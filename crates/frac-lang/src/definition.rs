//! Named definitions visible to programs.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
};

use crate::types::Type;

/// Identifier → definition table used during one analysis run.
pub type Definitions = BTreeMap<String, Definition>;

/// Whether a definition names a value or something callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Value,
    Function,
}

/// A resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    /// Variable introduced by the program; its type is fixed by the first `=`.
    User(UserDefinition),
    /// Value or function provided by the host shader.
    Builtin(BuiltinDefinition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDefinition {
    pub id: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinDefinition {
    pub id: String,
    /// Name emitted into GLSL.
    pub name: String,
    pub ty: Type,
    /// GLSL source of the function body, for builtins the template doesn't already provide.
    pub code: Option<String>,
}

impl Definition {
    /// Create a user variable definition.
    pub fn user(id: impl Into<String>, ty: Type) -> Self {
        Definition::User(UserDefinition { id: id.into(), ty })
    }

    /// Create a builtin value bound to a GLSL expression.
    pub fn builtin_value(id: impl Into<String>, name: impl Into<String>, ty: Type) -> Self {
        Definition::Builtin(BuiltinDefinition {
            id: id.into(),
            name: name.into(),
            ty,
            code: None,
        })
    }

    /// Create a builtin function, optionally carrying its GLSL body.
    pub fn builtin_function(
        id: impl Into<String>,
        name: impl Into<String>,
        ty: Type,
        code: Option<&str>,
    ) -> Self {
        Definition::Builtin(BuiltinDefinition {
            id: id.into(),
            name: name.into(),
            ty,
            code: code.map(|code| code.trim_end().to_string()),
        })
    }

    pub fn id(&self) -> &str {
        match self {
            Definition::User(def) => &def.id,
            Definition::Builtin(def) => &def.id,
        }
    }

    pub fn ty(&self) -> &Type {
        match self {
            Definition::User(def) => &def.ty,
            Definition::Builtin(def) => &def.ty,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        if self.ty().is_function() {
            DefinitionKind::Function
        } else {
            DefinitionKind::Value
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind() == DefinitionKind::Function
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Definition::Builtin(_))
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Definition::User(_))
    }

    pub fn as_builtin(&self) -> Option<&BuiltinDefinition> {
        match self {
            Definition::Builtin(def) => Some(def),
            Definition::User(_) => None,
        }
    }
}
