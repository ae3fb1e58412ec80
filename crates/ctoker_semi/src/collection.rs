//! Extension point for alternative token sources.

use ctoker_scanner::Token;

/// Something that can hand the semi-expression layer its next token.
///
/// Reserved for future token sources; no adapter is wired in yet, so the
/// default produces nothing.
pub trait TokenCollection {
    fn get(&mut self) -> Option<Token> {
        None
    }
}

/// A collection that never yields anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCollection;

impl TokenCollection for NullCollection {}
