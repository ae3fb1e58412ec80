//! The token-gathering state machine.
//!
//! Each extraction state assumes the next character in the source already
//! belongs to its category, and promises not to consume characters that
//! belong to another state. [`ScanState::dispatch`] establishes that
//! precondition by peeking one character ahead.

use ctoker_options::ScannerOptions;
use rustc_hash::FxHashSet;

use crate::char_codes::*;
use crate::source::CharSource;
use crate::token::{Token, TokenKind};

/// Two-character punctuators that are kept together as one token.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    pairs: FxHashSet<(char, char)>,
}

impl OperatorTable {
    pub fn new(pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }

    pub fn from_options(options: &ScannerOptions) -> Self {
        Self::new(options.pairs())
    }

    #[inline]
    pub fn contains(&self, first: char, second: char) -> bool {
        self.pairs.contains(&(first, second))
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::from_options(&ScannerOptions::default())
    }
}

/// A state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanState {
    /// Between tokens; the next character decides the following state.
    Dispatch,
    /// Collecting a run of whitespace.
    Whitespace,
    /// Collecting an identifier or number.
    Alphanumeric,
    /// Collecting a punctuator, literal, or comment.
    Punctuation,
}

impl ScanState {
    /// The extraction state for a token starting with `ch`.
    ///
    /// Anything that is neither whitespace nor a letter or digit is
    /// punctuation.
    pub fn classify(ch: char) -> ScanState {
        match TokenKind::of(ch) {
            TokenKind::Whitespace => ScanState::Whitespace,
            TokenKind::Word => ScanState::Alphanumeric,
            TokenKind::Punctuation => ScanState::Punctuation,
        }
    }

    /// Peek one character and choose the next state, `None` at end of input.
    pub fn dispatch(src: &mut CharSource) -> Option<ScanState> {
        src.peek(0).map(Self::classify)
    }

    /// Extract one maximal token of this state's kind.
    ///
    /// Returns `None` only when the source is exhausted.
    pub fn extract(self, src: &mut CharSource, operators: &OperatorTable) -> Option<Token> {
        match self {
            ScanState::Dispatch => Self::dispatch(src)?.extract(src, operators),
            ScanState::Whitespace => extract_white_space(src),
            ScanState::Alphanumeric => extract_alphanumeric(src),
            ScanState::Punctuation => extract_punctuation(src, operators),
        }
    }
}

fn extract_white_space(src: &mut CharSource) -> Option<Token> {
    let mut text = String::from(src.next()?);
    while let Some(ch) = src.peek(0).filter(|&ch| is_white_space(ch)) {
        text.push(ch);
        src.next();
    }
    Some(Token::with_kind(text, TokenKind::Whitespace))
}

fn extract_alphanumeric(src: &mut CharSource) -> Option<Token> {
    let mut text = String::from(src.next()?);
    while let Some(ch) = src.peek(0).filter(|&ch| is_word_part(ch)) {
        text.push(ch);
        src.next();
    }
    Some(Token::with_kind(text, TokenKind::Word))
}

fn extract_punctuation(src: &mut CharSource, operators: &OperatorTable) -> Option<Token> {
    let first = src.next()?;
    let mut text = String::from(first);
    let second = src.peek(0);

    match (first, second) {
        (DOUBLE_QUOTE | SINGLE_QUOTE, _) => scan_quoted(src, first, &mut text),
        (SLASH, Some(SLASH)) => scan_line_comment(src, &mut text),
        (SLASH, Some(ASTERISK)) => scan_block_comment(src, &mut text),
        (_, Some(second)) if operators.contains(first, second) => {
            text.push(second);
            src.next();
        }
        _ => {}
    }
    Some(Token::with_kind(text, TokenKind::Punctuation))
}

/// Consume through the closing quote. No escapes; runs to end of input if
/// the literal is unterminated.
fn scan_quoted(src: &mut CharSource, quote: char, text: &mut String) {
    for ch in src.by_ref() {
        text.push(ch);
        if ch == quote {
            break;
        }
    }
}

/// Consume up to, but not including, the line break.
///
/// A carriage return also ends the comment, so a CRLF line leaves no `\r`
/// in the comment text and a lone CR (classic Mac endings) ends the line.
fn scan_line_comment(src: &mut CharSource, text: &mut String) {
    while let Some(ch) = src.peek(0).filter(|&ch| !is_line_break(ch)) {
        text.push(ch);
        src.next();
    }
}

/// Consume through `*/`. The opening `/*` cannot also close the comment.
fn scan_block_comment(src: &mut CharSource, text: &mut String) {
    if let Some(star) = src.next() {
        text.push(star);
    }
    while let Some(ch) = src.next() {
        text.push(ch);
        if ch == ASTERISK && src.peek(0) == Some(SLASH) {
            text.push(SLASH);
            src.next();
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_all(text: &str) -> Vec<String> {
        let mut src = CharSource::from_text(text);
        let operators = OperatorTable::default();
        std::iter::from_fn(|| ScanState::Dispatch.extract(&mut src, &operators))
            .map(Token::into_string)
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(ScanState::classify(' '), ScanState::Whitespace);
        assert_eq!(ScanState::classify('\n'), ScanState::Whitespace);
        assert_eq!(ScanState::classify('x'), ScanState::Alphanumeric);
        assert_eq!(ScanState::classify('9'), ScanState::Alphanumeric);
        assert_eq!(ScanState::classify('_'), ScanState::Punctuation);
        assert_eq!(ScanState::classify('$'), ScanState::Punctuation);
        assert_eq!(ScanState::classify('#'), ScanState::Punctuation);
    }

    #[test]
    fn test_dispatch_at_end() {
        let mut src = CharSource::from_text("");
        assert_eq!(ScanState::dispatch(&mut src), None);
        assert_eq!(ScanState::Dispatch.extract(&mut src, &OperatorTable::default()), None);
    }

    #[test]
    fn test_whitespace_run_keeps_newlines() {
        assert_eq!(extract_all(" \t\n  x"), vec![" \t\n  ", "x"]);
    }

    #[test]
    fn test_alphanumeric_with_underscore() {
        assert_eq!(extract_all("foo_bar2 _x"), vec!["foo_bar2", " ", "_", "x"]);
    }

    #[test]
    fn test_two_char_operators() {
        for op in ["<<", ">>", "::", "==", "*=", "||", "&&", "++", "--", "+=", "-=", "/="] {
            assert_eq!(extract_all(op), vec![op], "operator {op}");
        }
    }

    #[test]
    fn test_no_three_char_operators() {
        assert_eq!(extract_all("<<="), vec!["<<", "="]);
        assert_eq!(extract_all("->"), vec!["-", ">"]);
        assert_eq!(extract_all("!="), vec!["!", "="]);
    }

    #[test]
    fn test_custom_operator_table() {
        let mut src = CharSource::from_text("->!=");
        let operators = OperatorTable::new([('-', '>')]);
        let first = ScanState::Dispatch.extract(&mut src, &operators).unwrap();
        let second = ScanState::Dispatch.extract(&mut src, &operators).unwrap();
        assert_eq!(first, "->");
        assert_eq!(second, "!");
    }

    #[test]
    fn test_block_comment_needs_separate_close() {
        assert_eq!(extract_all("/*/ x */y"), vec!["/*/ x */", "y"]);
        assert_eq!(extract_all("/**/"), vec!["/**/"]);
    }

    #[test]
    fn test_line_comment_stops_before_break() {
        assert_eq!(extract_all("// hi\r\nx"), vec!["// hi", "\r\n", "x"]);
        assert_eq!(extract_all("// hi\nx"), vec!["// hi", "\n", "x"]);
    }

    #[test]
    fn test_line_comment_ends_at_lone_carriage_return() {
        assert_eq!(extract_all("// a\rb"), vec!["// a", "\r", "b"]);
    }
}
