//! A peekable, line-counting character source.
//!
//! Characters are decoded from the underlying byte stream on demand; `peek`
//! buffers them in a lookahead queue so token states can look past the
//! current character without consuming it.

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;

use ctoker_core::{Result, TokerError};
use tracing::{debug, warn};

use crate::char_codes::{utf8_width, BYTE_ORDER_MARK, LINE_FEED, REPLACEMENT_CHARACTER};

/// Reads characters from a file, string, or any byte stream.
///
/// `None` from [`peek`](CharSource::peek) or [`next`](Iterator::next) marks
/// the end of input.
pub struct CharSource {
    /// The attached stream, `None` when not ready.
    reader: Option<Box<dyn BufRead>>,
    /// Decoded but not yet consumed characters.
    lookahead: VecDeque<char>,
    /// 1-based line of the next character.
    line_count: usize,
    /// The read failure that detached the stream, until taken.
    error: Option<TokerError>,
}

impl CharSource {
    /// Create a source with nothing attached.
    pub fn new() -> Self {
        Self {
            reader: None,
            lookahead: VecDeque::new(),
            line_count: 1,
            error: None,
        }
    }

    /// Create a source over in-memory text.
    pub fn from_text(text: &str) -> Self {
        Self::from_reader(Cursor::new(text.as_bytes().to_vec()))
    }

    /// Create a source over an arbitrary byte stream.
    pub fn from_reader(reader: impl Read + 'static) -> Self {
        let mut source = Self::new();
        source.attach(Box::new(BufReader::new(reader)));
        source
    }

    /// Attach to the file at `path`, returning false if it cannot be opened.
    pub fn open(&mut self, path: impl AsRef<Path>) -> bool {
        match self.try_open(path) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to open source");
                false
            }
        }
    }

    /// Attach to the file at `path`.
    ///
    /// On failure the source is left closed.
    pub fn try_open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.close();
        let file = File::open(path).map_err(|err| TokerError::open(path, err))?;
        let metadata = file.metadata().map_err(|err| TokerError::open(path, err))?;
        if metadata.is_dir() {
            return Err(TokerError::open(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "is a directory"),
            ));
        }
        debug!(path = %path.display(), "opened source");
        self.attach(Box::new(BufReader::new(file)));
        Ok(())
    }

    fn attach(&mut self, reader: Box<dyn BufRead>) {
        self.reader = Some(reader);
        self.error = None;
        self.lookahead.clear();
        self.line_count = 1;
        if self.peek(0) == Some(BYTE_ORDER_MARK) {
            self.lookahead.pop_front();
        }
    }

    /// Release the underlying stream. Safe to call more than once.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!(line = self.line_count, "closed source");
        }
        self.lookahead.clear();
    }

    /// Whether a stream is attached.
    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Look `n` characters ahead without consuming anything.
    pub fn peek(&mut self, n: usize) -> Option<char> {
        while self.lookahead.len() <= n {
            let ch = self.read_char()?;
            self.lookahead.push_back(ch);
        }
        self.lookahead.get(n).copied()
    }

    /// Whether every character has been consumed.
    pub fn end(&mut self) -> bool {
        self.lookahead.is_empty() && self.peek_byte().is_none()
    }

    /// Take the read failure that ended input early, if there was one.
    ///
    /// A failed read detaches the stream and reads as end of input; this is
    /// the only place the cause is reported.
    pub fn take_error(&mut self) -> Option<TokerError> {
        self.error.take()
    }

    /// The 1-based line number, advanced once per consumed line feed.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    // ========================================================================
    // Decoding
    // ========================================================================

    fn read_char(&mut self) -> Option<char> {
        let lead = self.read_byte()?;
        let width = utf8_width(lead);
        if width == 1 {
            return Some(lead as char);
        }
        if width == 0 {
            warn!(byte = lead, "invalid UTF-8 lead byte");
            return Some(REPLACEMENT_CHARACTER);
        }

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match self.peek_byte() {
                Some(byte) if byte & 0xC0 == 0x80 => {
                    *slot = byte;
                    self.read_byte();
                }
                _ => {
                    warn!(byte = lead, "truncated UTF-8 sequence");
                    return Some(REPLACEMENT_CHARACTER);
                }
            }
        }
        match std::str::from_utf8(&bytes[..width]) {
            Ok(s) => s.chars().next(),
            Err(_) => {
                warn!(byte = lead, "invalid UTF-8 sequence");
                Some(REPLACEMENT_CHARACTER)
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let byte = self.peek_byte()?;
        self.reader.as_mut()?.consume(1);
        Some(byte)
    }

    fn peek_byte(&mut self) -> Option<u8> {
        loop {
            let reader = self.reader.as_mut()?;
            match reader.fill_buf().map(|buf| buf.first().copied()) {
                Ok(byte) => return byte,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.fail(err);
                    return None;
                }
            }
        }
    }

    fn fail(&mut self, err: io::Error) {
        warn!(error = %err, line = self.line_count, "treating read failure as end of input");
        self.reader = None;
        self.error = Some(TokerError::from(err));
    }
}

impl Iterator for CharSource {
    type Item = char;

    /// Consume the next character.
    fn next(&mut self) -> Option<char> {
        let ch = match self.lookahead.pop_front() {
            Some(ch) => ch,
            None => self.read_char()?,
        };
        if ch == LINE_FEED {
            self.line_count += 1;
        }
        Some(ch)
    }
}

impl Default for CharSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CharSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharSource")
            .field("open", &self.is_open())
            .field("lookahead", &self.lookahead)
            .field("line_count", &self.line_count)
            .field("error", &self.error)
            .finish()
    }
}
