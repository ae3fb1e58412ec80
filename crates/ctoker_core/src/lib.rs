//! ctoker_core: Shared types for the ctoker lexical front end.
//!
//! Provides the error taxonomy used by the scanner and the
//! semi-expression layer.

pub mod error;

// Re-export commonly used types
pub use error::{Result, TokerError};
