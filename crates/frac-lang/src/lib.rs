//! Front end for the fractal iteration language.
//!
//! This crate turns source text into a typed, cast-annotated semantic tree:
//! tokenize → build syntax tree → analyze. The [`Parser`] bundles the three
//! stages and memoizes the last result. Code generation lives in `frac-glsl`.

#![no_std]

extern crate alloc;

pub mod builtins;
mod definition;
mod error;
pub mod lexer;
pub mod ops;
mod parser;
pub mod semantic;
pub mod syntax;
mod token;
pub mod tree_builder;
mod types;
pub mod util;

pub use definition::{
    BuiltinDefinition, Definition, DefinitionKind, Definitions, UserDefinition,
};
pub use error::{Diagnostic, ErrorKind, ParseError, ParseResult};
pub use lexer::Tokenizer;
pub use parser::{Parser, ParserOptions};
pub use semantic::{AnalyzerOptions, SemanticAnalyzer};
pub use token::{Symbol, Token, TokenGroup, TokenKind, Tokens};
pub use tree_builder::TreeBuilder;
pub use types::{FunctionType, Type};

/// Number of columns a tab advances indentation by.
pub const TAB_SIZE: usize = 4;
