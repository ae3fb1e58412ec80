//! Error types for source handling.
//!
//! Most boundary operations report failure as a plain `bool`; these errors
//! back the `try_*` variants underneath them. A stream that fails mid-scan
//! reads as end of input and keeps its `Read` error for `take_error`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An error raised while attaching to or reading from a text source.
#[derive(Debug, Error)]
pub enum TokerError {
    /// The named source could not be opened.
    #[error("can't open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The underlying stream failed after it was opened.
    #[error("read failed: {source}")]
    Read {
        #[source]
        source: io::Error,
    },
}

impl TokerError {
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TokerError::Open {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from a failed open.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, TokerError::Open { .. })
    }
}

impl From<io::Error> for TokerError {
    fn from(source: io::Error) -> Self {
        TokerError::Read { source }
    }
}

pub type Result<T> = std::result::Result<T, TokerError>;
