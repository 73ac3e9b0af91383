//! The `compile` subtest
//!
//! Compiles each program and checks the generated shader pieces.

use frac_glsl::{CodeTemplate, Compiler};

use crate::{filecheck::match_filecheck, parser::parse_test_file};

/// Run every program of a `test compile` file
pub fn run_compile_tests(content: &str) {
    let test_cases = parse_test_file(content);

    assert!(!test_cases.is_empty(), "No test cases found in test file");

    for case in test_cases {
        assert_eq!(
            case.command, "test compile",
            "Unexpected test command: {}",
            case.command
        );
        run_compile_test(&case.name, &case.source, &case.expected_text);
    }
}

fn run_compile_test(name: &str, source: &str, expected_text: &str) {
    let mut compiler = Compiler::default();
    let template = match compiler.compile(source) {
        Ok(template) => template,
        Err(e) => panic!("Program '{}' failed to compile:\n{}\n\nSource:\n{}", name, e, source),
    };

    let actual = describe_template(template);

    if let Err(e) = match_filecheck(&actual, expected_text) {
        panic!(
            "Compile test '{}' failed: {}\n\nExpected:\n{}\n\nActual:\n{}\n\nSource:\n{}",
            name, e, expected_text, actual, source
        );
    }
}

/// Text form of a template that filecheck directives run against:
///
/// ```text
/// functions: mulComplex
/// init:
///     vec2 _z = vec2(0.0, 0);
/// body:
///         _z = (mulComplex(_z, _z) + uv);
///         vec2 _0 = _z;
/// predicate: (length(_0) < float(int(2)))
/// ```
pub fn describe_template(template: &CodeTemplate) -> String {
    let functions: Vec<&str> = template
        .functions
        .iter()
        .filter_map(|code| code.split('(').next())
        .filter_map(|head| head.split_whitespace().last())
        .collect();

    let mut out = format!("functions: {}\n", functions.join(", "));
    push_block(&mut out, "init", &template.init);
    push_block(&mut out, "body", &template.loop_body);
    out.push_str("predicate: ");
    out.push_str(&template.loop_predicate);
    out
}

fn push_block(out: &mut String, label: &str, block: &str) {
    out.push_str(label);
    out.push_str(":\n");
    if !block.is_empty() {
        out.push_str(block);
        out.push('\n');
    }
}
