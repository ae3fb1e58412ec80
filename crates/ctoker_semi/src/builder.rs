//! Collects semi-expressions from a token stream.

use std::io::{self, Write};
use std::path::Path;

use ctoker_core::Result;
use ctoker_options::{Config, SemiOptions};
use ctoker_scanner::{Token, Tokenizer};
use tracing::debug;

use crate::semi_exp::SemiExp;

const FOR_KEYWORD: &str = "for";

/// Extra accumulation passes that fold a `for(init; cond; incr)` header
/// back into one unit.
const FOR_CLAUSE_PASSES: usize = 2;

/// Pulls tokens from a [`Tokenizer`] and groups them into semi-expressions.
#[derive(Debug)]
pub struct SemiExpBuilder {
    tokenizer: Tokenizer,
    semi: SemiExp,
    options: SemiOptions,
}

impl SemiExpBuilder {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_options(options: SemiOptions) -> Self {
        Self::with_config(Config {
            semi: options,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        let mut tokenizer = Tokenizer::with_options(&config.scanner);
        // Directive lines end at a newline, so the builder always needs to
        // see them; `return_newlines` only decides whether they are kept.
        tokenizer.set_return_newlines(true);
        Self {
            tokenizer,
            semi: SemiExp::new(),
            options: config.semi,
        }
    }

    pub fn options(&self) -> &SemiOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut SemiOptions {
        &mut self.options
    }

    /// Open the file at `path`, returning false if it cannot be opened.
    pub fn open(&mut self, path: impl AsRef<Path>) -> bool {
        self.tokenizer.open(path)
    }

    pub fn try_open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.tokenizer.try_open(path)
    }

    /// Collect from in-memory text.
    pub fn open_text(&mut self, text: &str) {
        self.tokenizer.open_text(text);
    }

    pub fn close(&mut self) {
        self.tokenizer.close();
    }

    pub fn is_done(&self) -> bool {
        self.tokenizer.is_done()
    }

    pub fn line_count(&self) -> usize {
        self.tokenizer.line_count()
    }

    /// Collect the next semi-expression.
    ///
    /// Returns false once the input is exhausted. If the input ends before a
    /// terminator, the tokens gathered so far form the last semi-expression.
    ///
    /// When the collected tokens include `for`, two more units are collected
    /// and appended, so a `for(;;)` header stays in one piece. The check
    /// looks only for the token, not for balanced parentheses.
    pub fn get_semi(&mut self) -> bool {
        self.semi.flush();
        let line = self.line_count();

        let unit = self.collect_unit();
        self.semi.extend(unit);

        if self.semi.find_first(FOR_KEYWORD).is_some() {
            debug!(line, "merging for-loop clauses");
            for _ in 0..FOR_CLAUSE_PASSES {
                let clause = self.collect_unit();
                self.semi.extend(clause);
            }
        }

        if self.options.verbose && !self.semi.is_empty() {
            debug!(line, semi = %self.display_str(), "semi-expression");
        }
        !self.semi.is_empty()
    }

    /// Accumulate tokens up to the next terminator, then trim.
    fn collect_unit(&mut self) -> SemiExp {
        let mut unit = SemiExp::new();
        while let Some(token) = self.tokenizer.get_tok() {
            if self.options.discard_comments && token.is_comment() {
                continue;
            }
            let terminates = is_terminator(&token, &unit);
            if !token.is_newline() || (self.options.return_newlines && !unit.is_empty()) {
                unit.push(token);
            }
            if terminates && !unit.is_empty() {
                break;
            }
        }
        unit.trim(self.options.return_newlines);
        unit
    }

    /// The most recently collected semi-expression.
    pub fn semi(&self) -> &SemiExp {
        &self.semi
    }

    pub fn semi_mut(&mut self) -> &mut SemiExp {
        &mut self.semi
    }

    /// Take the collected semi-expression, leaving an empty one.
    pub fn take_semi(&mut self) -> SemiExp {
        std::mem::take(&mut self.semi)
    }

    /// Render the current semi-expression per `display_newlines`.
    pub fn display_str(&self) -> String {
        self.semi.display_str(self.options.display_newlines)
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        self.semi.display(out, self.options.display_newlines)
    }
}

impl Default for SemiExpBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `;`, `{` and `}` always end a unit; a newline ends it only on a
/// preprocessor directive line.
fn is_terminator(token: &Token, unit: &SemiExp) -> bool {
    match token.as_str() {
        ";" | "{" | "}" => true,
        "\n" => unit
            .iter()
            .find(|tok| !tok.is_whitespace())
            .is_some_and(|tok| tok == "#"),
        _ => false,
    }
}
