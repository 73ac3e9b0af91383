//! Error types for code generation and compilation.

use frac_lang::ParseError;
use thiserror::Error;

/// Result type for code generation.
pub type GlslResult<T> = Result<T, CodeGenerationError>;

/// A semantic tree the generator can't express in GLSL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CodeGenerationError(String);

impl CodeGenerationError {
    pub fn new(msg: impl Into<String>) -> Self {
        CodeGenerationError(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("Max iterations must be an integer in 0..={max}, got {value}", max = u32::MAX)]
    InvalidMaxIters { value: f64 },
}

/// Any failure of [`Compiler::compile`](crate::Compiler::compile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Code generation error: {0}")]
    CodeGeneration(#[from] CodeGenerationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CodeGenerationError::new("Loop is empty").to_string(), "Loop is empty");
        assert_eq!(
            CompileError::from(CodeGenerationError::new("Loop is empty")).to_string(),
            "Code generation error: Loop is empty"
        );
        assert!(TemplateError::InvalidMaxIters { value: 1.5 }
            .to_string()
            .ends_with("got 1.5"));
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let parse = ParseError::semantic("z is undefined", "z", 0);
        let err = CompileError::from(parse.clone());
        assert_eq!(err.to_string(), parse.to_string());
    }
}
