//! Tests for complete programs: generated init, loop body and predicate.

mod frac_test;
use frac_test::FracTest;

#[test]
fn test_counter() {
    let test = FracTest::new("x = 1\ndo\n  x += 1\nwhile\n  x < 10").unwrap();
    test.assert_init("int _x = int(1);");
    test.assert_loop_body("(_x += int(1));");
    test.assert_predicate("(_x < int(10))");
    test.assert_functions(&[]);
}

#[test]
fn test_empty_loop_body() {
    let test = FracTest::new("do\nwhile\n  false").unwrap();
    test.assert_init("");
    test.assert_loop_body("");
    test.assert_predicate("false");
}

#[test]
fn test_mandelbrot() {
    let test = FracTest::new(
        r#"
z = 0i
do
    z = z * z + COORD
while
    mod(z) < 2
"#,
    )
    .unwrap();
    test.assert_init("vec2 _z = vec2(0.0, 0);");
    test.assert_loop_body(
        r#"
        _z = (mulComplex(_z, _z) + uv);
        vec2 _0 = _z;
        "#,
    );
    test.assert_predicate("(length(_0) < float(int(2)))");
    test.assert_functions(&["mulComplex"]);
}

#[test]
fn test_single_line_blocks() {
    let test = FracTest::new("z = 0i\ndo z ^= 2; z += COORD\nwhile mod(z) < 2").unwrap();
    test.assert_loop_body(
        r#"
        (_z = powComplex(_z, int(2)));
        (_z += uv);
        vec2 _0 = _z;
        "#,
    );
    test.assert_functions(&["powComplex"]);
}

#[test]
fn test_multiple_predicate_lines() {
    let test = FracTest::new("i = 0\ndo\n  i += 1\nwhile\n  j = i * 2\n  j < 100").unwrap();
    test.assert_loop_body(
        r#"
        (_i += int(1));
        int _j = (_i * int(2));
        "#,
    );
    test.assert_predicate("(_j < int(100))");
}

#[test]
fn test_builtin_functions_and_values() {
    let test = FracTest::new(
        "z = COORD\nt = MILLIS / 1000\ndo\n  z = con(z) + complex(sin(t))\nwhile\n  real(z) < PI",
    )
    .unwrap();
    test.assert_init(
        r#"
        vec2 _z = uv;
        float _t = (u_millis / float(int(1000)));
        "#,
    );
    test.assert_loop_body(
        r#"
        vec2 _0 = _z;
        float _1 = _t;
        vec2 _2 = vec2(sin(_1), 0.0);
        _z = (getCon(_0) + toComplex(_2));
        vec2 _3 = _z;
        "#,
    );
    test.assert_predicate("(getReal(_3) < 3.14159265359)");
    test.assert_functions(&["getCon", "toComplex", "getReal"]);
}

#[test]
fn test_bool_arithmetic_promotes_to_int() {
    let test = FracTest::new("x = true + 1\ndo\nwhile\n  x == 2").unwrap();
    test.assert_init("int _x = (int(true) + int(1));");
    test.assert_predicate("(_x == int(2))");
}

#[test]
fn test_complex_division() {
    let test = FracTest::new("z = 1 + 1i\ndo\n  z /= 2i\nwhile\n  z != 0i").unwrap();
    test.assert_init("vec2 _z = (vec2(int(1), 0.0) + vec2(0.0, 1));");
    test.assert_loop_body("(_z = divComplex(_z, vec2(0.0, 2)));");
    test.assert_predicate("(_z != vec2(0.0, 0))");
    test.assert_functions(&["divComplex"]);
}
