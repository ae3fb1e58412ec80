//! ctoker_scanner: Character-level tokenizer for C-family source text.
//!
//! A small finite-state scanner that pulls characters from a peekable
//! source and extracts one maximal token at a time:
//! - Whitespace runs (filtered out of the public stream)
//! - Identifiers and numbers
//! - Punctuators, including a configurable set of two-character operators
//! - String and character literals
//! - Line and block comments

mod char_codes;
mod source;
mod state;
mod token;
mod tokenizer;

pub use source::CharSource;
pub use state::{OperatorTable, ScanState};
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;
