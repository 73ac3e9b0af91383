//! Builtin values and functions provided by the shader template.
//!
//! Two catalogs are exposed: [`default_definitions`] seeds the analyzer's
//! identifier table, [`operator_overloads`] gives the generator the GLSL
//! functions that implement complex `*`, `/` and `^`.

use alloc::{string::String, vec, vec::Vec};

use crate::{
    definition::{Definition, Definitions},
    types::Type,
};

pub const MUL_COMPLEX: &str = "<mul-complex>";
pub const DIV_COMPLEX: &str = "<div-complex>";
pub const POW_COMPLEX: &str = "<pow-complex>";

const TO_BOOL: &str = include_str!("../glsl/cast/to_bool.glsl");
const TO_INT: &str = include_str!("../glsl/cast/to_int.glsl");
const TO_FLOAT: &str = include_str!("../glsl/cast/to_float.glsl");
const TO_COMPLEX: &str = include_str!("../glsl/cast/to_complex.glsl");
const MUL_COMPLEX_CODE: &str = include_str!("../glsl/op/mul_complex.glsl");
const DIV_COMPLEX_CODE: &str = include_str!("../glsl/op/div_complex.glsl");
const POW_COMPLEX_CODE: &str = include_str!("../glsl/op/pow_complex.glsl");
const GET_ARG: &str = include_str!("../glsl/complex/get_arg.glsl");
const GET_CON: &str = include_str!("../glsl/complex/get_con.glsl");
const GET_REAL: &str = include_str!("../glsl/complex/get_real.glsl");
const GET_IMM: &str = include_str!("../glsl/complex/get_imm.glsl");

fn unary(arg: Type, ret: Type) -> Type {
    Type::function(vec![arg], ret)
}

fn function(id: &str, name: &str, ty: Type, code: Option<&str>) -> Definition {
    Definition::builtin_function(id, name, ty, code)
}

/// Complex multiplication, used for `*` and `*=` with a complex left side.
pub fn mul_complex() -> Definition {
    function(
        MUL_COMPLEX,
        "mulComplex",
        Type::function(vec![Type::Complex, Type::Complex], Type::Complex),
        Some(MUL_COMPLEX_CODE),
    )
}

/// Complex division, used for `/` and `/=` with a complex left side.
pub fn div_complex() -> Definition {
    function(
        DIV_COMPLEX,
        "divComplex",
        Type::function(vec![Type::Complex, Type::Complex], Type::Complex),
        Some(DIV_COMPLEX_CODE),
    )
}

/// Integer power of a complex number, used for `^` and `^=`.
pub fn pow_complex() -> Definition {
    function(
        POW_COMPLEX,
        "powComplex",
        Type::function(vec![Type::Complex, Type::Int], Type::Complex),
        Some(POW_COMPLEX_CODE),
    )
}

/// Builtin functions callable from programs.
pub fn functions() -> Vec<Definition> {
    vec![
        function("arg", "getArg", unary(Type::Complex, Type::Float), Some(GET_ARG)),
        function("con", "getCon", unary(Type::Complex, Type::Complex), Some(GET_CON)),
        function("real", "getReal", unary(Type::Complex, Type::Float), Some(GET_REAL)),
        function("imm", "getImm", unary(Type::Complex, Type::Float), Some(GET_IMM)),
        function("bool", "toBool", unary(Type::Complex, Type::Bool), Some(TO_BOOL)),
        function("int", "toInt", unary(Type::Complex, Type::Int), Some(TO_INT)),
        function("float", "toFloat", unary(Type::Complex, Type::Float), Some(TO_FLOAT)),
        function("complex", "toComplex", unary(Type::Complex, Type::Complex), Some(TO_COMPLEX)),
        function("mod", "length", unary(Type::Complex, Type::Float), None),
        function("norm", "normalize", unary(Type::Complex, Type::Complex), None),
        function("rad", "radians", unary(Type::Float, Type::Float), None),
        function("deg", "degrees", unary(Type::Float, Type::Float), None),
        function("sin", "sin", unary(Type::Float, Type::Float), None),
        function("cos", "cos", unary(Type::Float, Type::Float), None),
        function("tan", "tan", unary(Type::Float, Type::Float), None),
        function("asin", "asin", unary(Type::Float, Type::Float), None),
        function("acos", "acos", unary(Type::Float, Type::Float), None),
        function("atan", "atan", unary(Type::Float, Type::Float), None),
    ]
}

/// Builtin values readable from programs.
pub fn values() -> Vec<Definition> {
    vec![
        Definition::builtin_value("COORD", "uv", Type::Complex),
        Definition::builtin_value("MILLIS", "u_millis", Type::Float),
        Definition::builtin_value("PI", "3.14159265359", Type::Float),
        Definition::builtin_value("E", "2.71828182846", Type::Float),
    ]
}

/// Identifier table the analyzer starts every run with.
pub fn default_definitions() -> Definitions {
    into_table(functions().into_iter().chain(values()))
}

/// Operator overloads the generator calls for complex arithmetic.
pub fn operator_overloads() -> Definitions {
    into_table([mul_complex(), div_complex(), pow_complex()])
}

/// Key a list of definitions by id.
pub fn into_table(definitions: impl IntoIterator<Item = Definition>) -> Definitions {
    definitions
        .into_iter()
        .map(|def| (String::from(def.id()), def))
        .collect()
}
