//! Character constants and classification used by the scanner.

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const DOUBLE_QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const ASTERISK: char = '*';
pub const SLASH: char = '/';
pub const UNDERSCORE: char = '_';
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Check if a character is whitespace, line breaks included.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    ch.is_whitespace()
}

/// Check if a character is a letter or a digit in any script.
#[inline]
pub fn is_letter_or_digit(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// Check if a character can continue an identifier-or-number token.
#[inline]
pub fn is_word_part(ch: char) -> bool {
    is_letter_or_digit(ch) || ch == UNDERSCORE
}

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == LINE_FEED || ch == CARRIAGE_RETURN
}

/// Byte length of a UTF-8 sequence given its lead byte, 0 if the byte
/// cannot start a sequence.
#[inline]
pub fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
