//! Tests for rejected programs: lexical, syntax, semantic and code generation errors.

mod frac_test;
use frac_glsl::{CompileError, Compiler, CompilerOptions, GeneratorOptions};
use frac_lang::{Definitions, ErrorKind, ParseError};
use frac_test::FracTest;

fn parse_error(source: &str) -> ParseError {
    match FracTest::new(source) {
        Err(CompileError::Parse(err)) => err,
        Err(other) => panic!("expected a parse error, got: {}", other),
        Ok(_) => panic!("expected {:?} to be rejected", source),
    }
}

#[test]
fn test_empty_predicate() {
    let err = parse_error("do\nwhile");
    assert_eq!(err.kind(), ErrorKind::Semantic);
    assert_eq!(err.reason(), "Loop predicate is empty");
}

#[test]
fn test_undefined_identifier() {
    let err = parse_error("do\n  y = z\nwhile\n  true");
    assert_eq!(err.kind(), ErrorKind::Semantic);
    assert_eq!(
        err.to_string(),
        format!(
            "Semantic error in line: \"  y = z\"\n{}^\nz is undefined",
            " ".repeat(31)
        )
    );
}

#[test]
fn test_fractional_complex_power() {
    let err = parse_error("z = 1i\ndo\n  z = z ^ 1.5\nwhile\n  true");
    assert_eq!(err.kind(), ErrorKind::Semantic);
    assert_eq!(
        err.reason(),
        "Value of type complex can only be raised to a power implicitly castable to int type"
    );
}

#[test]
fn test_builtin_modification() {
    let err = parse_error("do\n  PI += 1\nwhile\n  true");
    assert_eq!(
        err.reason(),
        "Modification of built-in values/functions isn't allowed"
    );
}

#[test]
fn test_wrong_argument_count() {
    let err = parse_error("do\nwhile\n  mod(1i, 2i) < 1");
    assert_eq!(err.reason(), "mod requires 1 argument(s) but 2 was/were provided");
}

#[test]
fn test_illegal_character() {
    let err = parse_error("x = 1 $ 2\ndo\nwhile\n  true");
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(err.reason(), "Illegal character");
    assert_eq!(err.pos(), 6);
}

#[test]
fn test_incomplete_expression() {
    let err = parse_error("do\nwhile\n  1 +");
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(matches!(err, ParseError::Expected { .. }));
}

#[test]
fn test_missing_overload() {
    let mut compiler = Compiler::new(CompilerOptions {
        generator: GeneratorOptions {
            definitions: Definitions::new(),
            ..GeneratorOptions::default()
        },
        ..CompilerOptions::default()
    });

    let err = compiler
        .compile("z = 1i\ndo\n  z = z * z\nwhile\n  true")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Code generation error: Missing <mul-complex> function definition"
    );
}
