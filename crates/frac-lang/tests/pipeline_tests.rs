//! Tests for the front-end stages chained together: tokens, syntax tree, semantic tree.

use frac_lang::{
    semantic::ExprKind, ErrorKind, Parser, ParserOptions, Tokenizer, TreeBuilder, Type,
};

const COUNTER: &str = "x = 1\ndo\n  x += 1\nwhile\n  x < 10";

#[test]
fn test_token_listing() {
    let tokens = Tokenizer::new().tokenize(COUNTER).unwrap();
    assert_eq!(
        tokens.to_string(),
        "indent-same(0) id(x) = real(1) eol \
         indent-same(0) do eol \
         indent-grow(2) id(x) += real(1) eol \
         indent-shrink(0) while eol \
         indent-grow(2) id(x) < real(10) eot"
    );
}

#[test]
fn test_syntax_tree_listing() {
    let tokens = Tokenizer::new()
        .tokenize("a = 1 + 2 * 3\ndo\n  a -= 1\nwhile\n  a > 0")
        .unwrap();
    let tree = TreeBuilder::new().build_tree(&tokens).unwrap();
    assert_eq!(
        tree.to_string(),
        "(a = (1 + (2 * 3)))\ndo\n    (a -= 1)\nwhile\n    (a > 0)"
    );
}

#[test]
fn test_parse_counter() {
    let mut parser = Parser::default();
    let root = parser.parse(COUNTER).unwrap();

    assert_eq!(root.init.exprs.len(), 1);
    assert_eq!(root.init.exprs[0].ty, Type::Int);
    assert!(matches!(
        root.init.exprs[0].kind,
        ExprKind::Assign { first: true, .. }
    ));

    assert_eq!(root.main_loop.body.ty(), Type::Int);
    assert_eq!(root.main_loop.predicate.ty(), Type::Bool);
}

#[test]
fn test_logging_options_do_not_change_result() {
    let mut quiet = Parser::default();
    let mut verbose = Parser::new(ParserOptions {
        log_tokens: true,
        log_syntax_tree: true,
        log_semantic_tree: true,
        ..ParserOptions::default()
    });
    assert_eq!(*quiet.parse(COUNTER).unwrap(), *verbose.parse(COUNTER).unwrap());
}

#[test]
fn test_errors_by_stage() {
    let mut parser = Parser::default();

    let cases = [
        ("x = #", ErrorKind::Lexical, "Illegal character"),
        ("x = 1", ErrorKind::Syntax, "Expected: \"eol\".\nGot: eot"),
        ("do\nwhile", ErrorKind::Semantic, "Loop predicate is empty"),
    ];

    for (code, kind, reason) in cases {
        let err = parser.parse(code).unwrap_err();
        assert_eq!(err.kind(), kind, "{}", code);
        assert_eq!(err.reason(), reason, "{}", code);
        assert_eq!(err.code(), code);
    }
}

#[test]
fn test_error_caret_with_tabs() {
    let err = Parser::default()
        .parse("do\n\ty = z\nwhile\n\ttrue")
        .unwrap_err();
    // tab expands to four columns, caret sits under `z`
    let expected = format!(
        "Semantic error in line: \"    y = z\"\n{}^\nz is undefined",
        " ".repeat(24 + 4 + 4 + 1)
    );
    assert_eq!(err.to_string(), expected);
}
