//! Source → shader template, caching the last result.

use std::rc::Rc;

use frac_lang::{semantic, Parser, ParserOptions};
use tracing::{debug, trace};

use crate::{
    codegen::{CodeGenerator, GeneratorOptions},
    error::CompileError,
    template::CodeTemplate,
};

/// Configuration for [`Compiler`].
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    pub parser: ParserOptions,
    pub generator: GeneratorOptions,
    /// Skip code generation when the parser hands back the previous tree.
    pub memoize: bool,
    /// Emit the rendered shader as a `debug` event after each generation.
    pub log_code: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            parser: ParserOptions::default(),
            generator: GeneratorOptions::default(),
            memoize: true,
            log_code: false,
        }
    }
}

/// Full pipeline: parse, analyze, generate.
#[derive(Debug)]
pub struct Compiler {
    parser: Parser,
    generator: CodeGenerator,
    memoize: bool,
    log_code: bool,
    last: Option<(Rc<semantic::Root>, CodeTemplate)>,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(CompilerOptions::default())
    }
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        Compiler {
            parser: Parser::new(options.parser),
            generator: CodeGenerator::new(options.generator),
            memoize: options.memoize,
            log_code: options.log_code,
            last: None,
        }
    }

    /// Compile `source` into a template.
    ///
    /// When the source's token sequence is unchanged the previous template is
    /// returned as is, including any iteration limit set on it since. On
    /// failure the cached template stays in place.
    pub fn compile(&mut self, source: &str) -> Result<&mut CodeTemplate, CompileError> {
        let root = self.parser.parse(source)?;

        let cached = self.memoize
            && matches!(&self.last, Some((last_root, _)) if Rc::ptr_eq(last_root, &root));

        if cached {
            trace!("semantic tree unchanged, reusing template");
        } else {
            let template = self.generator.generate_code(&root)?;
            if self.log_code {
                debug!(code = %template.render(), "generated shader");
            }
            self.last = Some((root, template));
        }

        match &mut self.last {
            Some((_, template)) => Ok(template),
            None => unreachable!("template stored above"),
        }
    }

    /// Template produced by the last successful [`compile`](Self::compile).
    pub fn last_template(&self) -> Option<&CodeTemplate> {
        self.last.as_ref().map(|(_, template)| template)
    }

    /// Drop both the parser's and the compiler's cached results.
    pub fn clear(&mut self) {
        self.parser.clear();
        self.last = None;
    }
}
