//! The `error` subtest
//!
//! Checks that each program is rejected and matches the rendered error.

use frac_glsl::Compiler;

use crate::{filecheck::match_filecheck, parser::parse_test_file};

/// Run every program of a `test error` file
pub fn run_error_tests(content: &str) {
    let test_cases = parse_test_file(content);

    assert!(!test_cases.is_empty(), "No test cases found in test file");

    for case in test_cases {
        assert_eq!(
            case.command, "test error",
            "Unexpected test command: {}",
            case.command
        );
        run_error_test(&case.name, &case.source, &case.expected_text);
    }
}

fn run_error_test(name: &str, source: &str, expected_text: &str) {
    let mut compiler = Compiler::default();
    let actual = match compiler.compile(source) {
        Ok(template) => panic!(
            "Program '{}' compiled but should have failed\n\nPredicate: {}\n\nSource:\n{}",
            name, template.loop_predicate, source
        ),
        Err(e) => e.to_string(),
    };

    if let Err(e) = match_filecheck(&actual, expected_text) {
        panic!(
            "Error test '{}' failed: {}\n\nExpected:\n{}\n\nActual:\n{}\n\nSource:\n{}",
            name, e, expected_text, actual, source
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical() {
        let content = include_str!("../filetests/error/lexical.frac");
        run_error_tests(content);
    }

    #[test]
    fn test_syntax() {
        let content = include_str!("../filetests/error/syntax.frac");
        run_error_tests(content);
    }

    #[test]
    fn test_semantic() {
        let content = include_str!("../filetests/error/semantic.frac");
        run_error_tests(content);
    }
}
