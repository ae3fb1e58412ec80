//! The tokenizer facade.
//!
//! Drives the [`ScanState`] machine over a [`CharSource`] and hands out
//! non-whitespace tokens.

use std::path::Path;

use ctoker_core::{Result, TokerError};
use ctoker_options::ScannerOptions;
use tracing::{trace, warn};

use crate::char_codes::LINE_FEED;
use crate::source::CharSource;
use crate::state::{OperatorTable, ScanState};
use crate::token::Token;

/// Extracts tokens from a source, one at a time.
#[derive(Debug)]
pub struct Tokenizer {
    source: CharSource,
    /// The state that will extract the next token, `None` once done.
    state: Option<ScanState>,
    operators: OperatorTable,
    return_newlines: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_options(&ScannerOptions::default())
    }

    pub fn with_options(options: &ScannerOptions) -> Self {
        Self {
            source: CharSource::new(),
            state: None,
            operators: OperatorTable::from_options(options),
            return_newlines: options.return_newlines,
        }
    }

    /// Surface whitespace runs containing a line feed as `"\n"` tokens.
    pub fn set_return_newlines(&mut self, return_newlines: bool) {
        self.return_newlines = return_newlines;
    }

    pub fn return_newlines(&self) -> bool {
        self.return_newlines
    }

    /// Open the file at `path`, returning false if it cannot be opened.
    pub fn open(&mut self, path: impl AsRef<Path>) -> bool {
        match self.try_open(path) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "tokenizer could not open source");
                false
            }
        }
    }

    /// Open the file at `path`.
    ///
    /// On failure the tokenizer is left done, with no source attached.
    pub fn try_open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.state = None;
        self.source.try_open(path)?;
        self.start();
        Ok(())
    }

    /// Tokenize in-memory text.
    pub fn open_text(&mut self, text: &str) {
        self.attach(CharSource::from_text(text));
    }

    /// Tokenize an already attached source.
    pub fn attach(&mut self, source: CharSource) {
        self.source.close();
        self.source = source;
        self.start();
    }

    fn start(&mut self) {
        self.state = Some(ScanState::Dispatch);
        self.settle();
    }

    /// Resolve a pending dispatch into the next extraction state.
    fn settle(&mut self) {
        if self.state == Some(ScanState::Dispatch) {
            self.state = ScanState::dispatch(&mut self.source);
        }
    }

    /// Release the source.
    pub fn close(&mut self) {
        self.source.close();
        self.state = None;
    }

    /// Whether the scanner has run out of input, or never had any.
    pub fn is_done(&self) -> bool {
        self.state.is_none()
    }

    /// Take the read failure that ended the source early, if any.
    pub fn take_error(&mut self) -> Option<TokerError> {
        self.source.take_error()
    }

    /// The line the scanner has reached, starting at 1.
    pub fn line_count(&self) -> usize {
        self.source.line_count()
    }

    /// Extract the next token, skipping whitespace.
    ///
    /// Returns `None` at end of input.
    pub fn get_tok(&mut self) -> Option<Token> {
        while let Some(state) = self.state {
            let token = state.extract(&mut self.source, &self.operators);
            self.state = Some(ScanState::Dispatch);
            self.settle();

            let Some(token) = token else { break };
            if !token.is_whitespace() {
                trace!(line = self.line_count(), token = token.as_str(), "token");
                return Some(token);
            }
            if self.return_newlines && token.as_str().contains(LINE_FEED) {
                return Some(Token::newline());
            }
        }
        None
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.get_tok()
    }
}
