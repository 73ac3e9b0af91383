//! Tests that rendered shaders are well-formed GLSL.

mod frac_test;
use frac_glsl::CodeTemplate;
use frac_test::FracTest;
use glsl::{parser::Parse, syntax::ShaderStage};

#[test]
fn test_default_template_parses() {
    let code = CodeTemplate::default().render();
    assert!(ShaderStage::parse(&code).is_ok(), "{}", code);
}

#[test]
fn test_counter_shader() {
    let test = FracTest::new("x = 1\ndo\n  x += 1\nwhile\n  x < 10").unwrap();
    test.assert_valid_glsl();

    let code = test.template().render();
    assert!(code.contains("    int _x = int(1);\n"));
    assert!(code.contains("        (_x += int(1));\n"));
    assert!(code.contains("if (!((_x < int(10))))"));
}

#[test]
fn test_mandelbrot_shader() {
    let test = FracTest::new("z = 0i\ndo\n  z = z ^ 2 + COORD\nwhile\n  mod(z) < 2").unwrap();
    let stage = test.assert_valid_glsl();

    // powComplex and main
    let functions = (stage.0)
        .0
        .iter()
        .filter(|decl| matches!(decl, glsl::syntax::ExternalDeclaration::FunctionDefinition(_)))
        .count();
    assert_eq!(functions, 2);
}

#[test]
fn test_every_builtin_shader() {
    let test = FracTest::new(
        r#"
z = COORD
t = MILLIS + PI + E
do
    a = arg(z) + real(z) + imm(z) + mod(z)
    b = rad(a) + deg(a) + sin(a) + cos(a) + tan(a) + asin(a) + acos(a) + atan(a)
    z = con(z) * norm(z) / complex(z) ^ int(z)
    z += float(z) + bool(z)
    t -= b
while
    t > 0 & !(z == 0i)
"#,
    )
    .unwrap();
    test.assert_valid_glsl();
    assert_eq!(test.template().functions.len(), 11);
}

#[test]
fn test_max_iters_in_shader() {
    let mut test_template = FracTest::new("do\nwhile\n  true").unwrap().template().clone();
    test_template.set_max_iters(250);
    let code = test_template.render();
    assert!(code.contains("i < 250;"));
    assert!(ShaderStage::parse(&code).is_ok());
}
