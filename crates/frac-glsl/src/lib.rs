//! GLSL back end for the fractal iteration language.
//!
//! [`CodeGenerator`] lowers a semantic tree from `frac-lang` into the pieces
//! of a fragment shader (helper functions, init block, loop body, loop
//! predicate) held by a [`CodeTemplate`]. [`Compiler`] runs the whole
//! pipeline and caches the last template.

mod codegen;
mod compiler;
mod error;
mod template;

pub use codegen::{CodeGenerator, GeneratorOptions, DEFAULT_VAR_PREFIX};
pub use compiler::{Compiler, CompilerOptions};
pub use error::{CodeGenerationError, CompileError, GlslResult, TemplateError};
pub use template::{placehold, CodeTemplate, DEFAULT_MAX_ITERS, DEFAULT_TEMPLATE};
