//! Tokens produced by the scanner.

use std::fmt;

use crate::char_codes::{is_letter_or_digit, is_white_space, LINE_FEED};

/// The lexical category of a token, implied by the state that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of whitespace characters.
    Whitespace,
    /// An identifier or number.
    Word,
    /// A punctuator, string or character literal, or comment.
    Punctuation,
}

impl TokenKind {
    /// The category a token starting with `ch` belongs to.
    pub fn of(ch: char) -> TokenKind {
        if is_white_space(ch) {
            TokenKind::Whitespace
        } else if is_letter_or_digit(ch) {
            TokenKind::Word
        } else {
            TokenKind::Punctuation
        }
    }
}

/// A single scanned token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    /// Create a token, classifying it by its first character.
    ///
    /// The scanner never produces empty tokens, but this constructor does
    /// not reject one; an empty token is classified as punctuation.
    /// Semi-expression edits refuse them.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = text.chars().next().map_or(TokenKind::Punctuation, TokenKind::of);
        Self { text, kind }
    }

    pub(crate) fn with_kind(text: String, kind: TokenKind) -> Self {
        Self { text, kind }
    }

    /// The bare line-break marker.
    pub fn newline() -> Self {
        Self::with_kind(LINE_FEED.to_string(), TokenKind::Whitespace)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// The length of this token in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether this token starts with whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().next().is_some_and(is_white_space)
    }

    /// Whether this token is exactly a line feed.
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }

    /// Whether this token is a `//` or `/* */` comment.
    pub fn is_comment(&self) -> bool {
        self.text.starts_with("//") || self.text.starts_with("/*")
    }

    /// Whether this token is a `//` comment, which runs to the end of its
    /// line.
    pub fn is_line_comment(&self) -> bool {
        self.text.starts_with("//")
    }

    pub fn ends_with_newline(&self) -> bool {
        self.text.ends_with(LINE_FEED)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::new(text)
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Token::new(text)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
