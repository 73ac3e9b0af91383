//! FracTest helper for integration tests.
//!
//! Runs the whole pipeline (tokenize → build → analyze → generate) on a
//! program and compares the generated shader pieces line by line.

use frac_glsl::{CodeTemplate, CompileError, Compiler};
use glsl::{parser::Parse, syntax::ShaderStage};

/// Test helper holding the template generated for one program.
pub struct FracTest {
    template: CodeTemplate,
}

impl FracTest {
    /// Compile `source` with default options.
    ///
    /// # Errors
    ///
    /// Returns `Err` if parsing, analysis or code generation fails.
    pub fn new(source: &str) -> Result<Self, CompileError> {
        let mut compiler = Compiler::default();
        let template = compiler.compile(source)?.clone();
        Ok(Self { template })
    }

    pub fn template(&self) -> &CodeTemplate {
        &self.template
    }

    /// Assert the init block matches `expected`, ignoring indentation and blank lines.
    pub fn assert_init(&self, expected: &str) {
        Self::assert_lines("init", &self.template.init, expected);
    }

    /// Assert the loop body matches `expected`, ignoring indentation and blank lines.
    pub fn assert_loop_body(&self, expected: &str) {
        Self::assert_lines("loop body", &self.template.loop_body, expected);
    }

    pub fn assert_predicate(&self, expected: &str) {
        assert_eq!(
            self.template.loop_predicate, expected,
            "loop predicate mismatch"
        );
    }

    /// Assert the helper functions emitted, by GLSL name, in order.
    pub fn assert_functions(&self, names: &[&str]) {
        let actual: Vec<&str> = self
            .template
            .functions
            .iter()
            .map(|code| Self::function_name(code))
            .collect();
        assert_eq!(actual, names, "helper function mismatch");
    }

    /// Render the template and parse it as GLSL.
    ///
    /// # Panics
    ///
    /// Panics with the rendered shader if it doesn't parse.
    pub fn assert_valid_glsl(&self) -> ShaderStage {
        let code = self.template.render();
        ShaderStage::parse(&code)
            .unwrap_or_else(|err| panic!("rendered shader doesn't parse: {}\n\n{}", err, code))
    }

    /// `vec2 mulComplex(vec2 a, vec2 b) {` → `mulComplex`
    fn function_name(code: &str) -> &str {
        code.split('(')
            .next()
            .and_then(|head| head.split_whitespace().last())
            .unwrap_or("")
    }

    fn assert_lines(what: &str, actual: &str, expected: &str) {
        let actual = Self::normalize(actual);
        let expected = Self::normalize(expected);
        if actual != expected {
            panic!(
                "{} mismatch:\n\nExpected:\n{}\n\nActual:\n{}\n",
                what,
                expected.join("\n"),
                actual.join("\n")
            );
        }
    }

    /// Trim each line and drop empty ones.
    fn normalize(code: &str) -> Vec<String> {
        code.lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect()
    }
}
