//! File-based tests for the fractal iteration compiler.
//!
//! Test files (`.frac`) hold:
//! - A test command header (`test compile` or `test error`)
//! - Programs, each introduced by a `program <name>` line
//! - Expected output as filecheck directives in `;` comments after each program

pub mod filecheck;
pub mod parser;

mod test_compile;
mod test_error;

pub use filecheck::{build_filechecker, match_filecheck};
pub use parser::{parse_test_file, TestCase};
pub use test_compile::{describe_template, run_compile_tests};
pub use test_error::run_error_tests;
