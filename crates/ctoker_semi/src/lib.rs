//! ctoker_semi: Groups scanned tokens into semi-expressions.
//!
//! A semi-expression is the run of tokens up to a statement terminator
//! (`;`, `{`, `}`), or up to the end of a preprocessor directive line.
//! The three clauses of a `for(;;)` header are kept together as one unit.

mod builder;
mod collection;
mod semi_exp;

pub use builder::SemiExpBuilder;
pub use collection::{NullCollection, TokenCollection};
pub use semi_exp::SemiExp;

// Re-export the token type so callers need only this crate
pub use ctoker_scanner::Token;
