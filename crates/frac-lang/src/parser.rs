//! Tokenize → build → analyze, with a single-slot memo.

use alloc::rc::Rc;

use tracing::{debug, trace};

use crate::{
    error::ParseResult,
    lexer::Tokenizer,
    semantic::{self, AnalyzerOptions, SemanticAnalyzer},
    token::Tokens,
    tree_builder::TreeBuilder,
};

/// Configuration for [`Parser`].
#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub analyzer: AnalyzerOptions,
    /// Reuse the previous tree when the token sequence hasn't changed.
    pub memoize: bool,
    /// Emit the token list as a `debug` event.
    pub log_tokens: bool,
    /// Emit the syntax tree as a `debug` event.
    pub log_syntax_tree: bool,
    /// Emit the semantic tree as a `debug` event.
    pub log_semantic_tree: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            analyzer: AnalyzerOptions::default(),
            memoize: true,
            log_tokens: false,
            log_syntax_tree: false,
            log_semantic_tree: false,
        }
    }
}

/// Front-end driver.
///
/// Source edits that leave the token sequence unchanged (whitespace inside a
/// line, for instance) return the previous tree handle without rebuilding it,
/// so callers can detect "nothing changed" with [`Rc::ptr_eq`].
#[derive(Debug)]
pub struct Parser {
    tokenizer: Tokenizer,
    tree_builder: TreeBuilder,
    analyzer: SemanticAnalyzer,
    options: ParserOptions,
    last: Option<(Tokens, Rc<semantic::Root>)>,
}

impl Default for Parser {
    fn default() -> Self {
        Parser::new(ParserOptions::default())
    }
}

impl Parser {
    pub fn new(options: ParserOptions) -> Self {
        Parser {
            tokenizer: Tokenizer::new(),
            tree_builder: TreeBuilder::new(),
            analyzer: SemanticAnalyzer::new(options.analyzer.clone()),
            options,
            last: None,
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse `code` into a semantic tree. A failed parse leaves the memo as it was.
    pub fn parse(&mut self, code: &str) -> ParseResult<Rc<semantic::Root>> {
        let tokens = self.tokenizer.tokenize(code)?;

        if self.options.log_tokens {
            debug!(tokens = %tokens, "tokenized");
        }

        if self.options.memoize {
            if let Some((last_tokens, tree)) = &self.last {
                if *last_tokens == tokens {
                    trace!("token sequence unchanged, reusing tree");
                    return Ok(Rc::clone(tree));
                }
            }
        }

        let syntax_tree = self.tree_builder.build_tree(&tokens)?;

        if self.options.log_syntax_tree {
            debug!(tree = %syntax_tree, "built syntax tree");
        }

        let semantic_tree = Rc::new(self.analyzer.analyze_semantic(&syntax_tree)?);

        if self.options.log_semantic_tree {
            debug!(tree = %semantic_tree, "analyzed semantic tree");
        }

        if self.options.memoize {
            self.last = Some((tokens, Rc::clone(&semantic_tree)));
        }

        Ok(semantic_tree)
    }

    /// Forget the memoized tree.
    pub fn clear(&mut self) {
        self.last = None;
    }
}
