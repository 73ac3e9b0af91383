//! Shader template and placeholder substitution.

use crate::error::TemplateError;

/// Fragment shader the generated pieces are spliced into.
pub const DEFAULT_TEMPLATE: &str = include_str!("../glsl/fragment.glsl");

pub const DEFAULT_MAX_ITERS: u32 = 32;

/// Generated shader pieces plus the text they are rendered into.
///
/// The template text may reference `{{ maxIters }}`, `{{ functions }}`,
/// `{{ init }}`, `{{ loopBody }}` and `{{ loopPredicate }}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTemplate {
    pub template: String,
    /// GLSL bodies of the helper functions the program uses, in first-use order.
    pub functions: Vec<String>,
    pub init: String,
    pub loop_body: String,
    /// Bare bool expression; the loop continues while it holds.
    pub loop_predicate: String,
    max_iters: u32,
}

impl Default for CodeTemplate {
    fn default() -> Self {
        CodeTemplate {
            template: DEFAULT_TEMPLATE.to_string(),
            functions: Vec::new(),
            init: String::new(),
            loop_body: String::new(),
            loop_predicate: "false".to_string(),
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

impl CodeTemplate {
    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = CodeTemplate::default();
    }

    pub fn max_iters(&self) -> u32 {
        self.max_iters
    }

    pub fn set_max_iters(&mut self, max_iters: u32) {
        self.max_iters = max_iters;
    }

    /// Set the iteration limit from an untyped number, as it arrives from UI inputs.
    pub fn try_set_max_iters(&mut self, value: f64) -> Result<(), TemplateError> {
        if value % 1.0 != 0.0 || !(0.0..=u32::MAX as f64).contains(&value) {
            return Err(TemplateError::InvalidMaxIters { value });
        }
        self.max_iters = value as u32;
        Ok(())
    }

    /// Substitute the generated pieces into the template text.
    pub fn render(&self) -> String {
        let max_iters = self.max_iters.to_string();
        let functions = self.functions.join("\n\n");

        placehold(&self.template, |key| match key {
            "maxIters" => Some(max_iters.as_str()),
            "functions" => Some(functions.as_str()),
            "init" => Some(self.init.as_str()),
            "loopBody" => Some(self.loop_body.as_str()),
            "loopPredicate" => Some(self.loop_predicate.as_str()),
            _ => None,
        })
    }
}

/// Replace every `{{ key }}` in `text` with `lookup(key)`.
///
/// Keys are trimmed; unknown keys render as the empty string. An unterminated
/// `{{` is copied through unchanged.
pub fn placehold<'a>(text: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };

        out.push_str(&rest[..start]);
        let key = rest[start + 2..start + 2 + len].trim();
        out.push_str(lookup(key).unwrap_or(""));
        rest = &rest[start + 2 + len + 2..];
    }

    out.push_str(rest);
    out
}
