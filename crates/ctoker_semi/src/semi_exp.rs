//! The semi-expression token container.

use std::fmt;
use std::io::{self, Write};
use std::ops::{Index, IndexMut};

use ctoker_scanner::Token;

/// An ordered, editable sequence of non-empty tokens.
///
/// Two semi-expressions are equal when they hold the same tokens in the
/// same order; sequences of different length never compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemiExp {
    tokens: Vec<Token>,
}

impl SemiExp {
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Replace the token at `index`. Returns false if out of range or if
    /// `token` is empty.
    pub fn set(&mut self, index: usize, token: impl Into<Token>) -> bool {
        let token = token.into();
        match self.tokens.get_mut(index) {
            Some(slot) if !token.is_empty() => {
                *slot = token;
                true
            }
            _ => false,
        }
    }

    /// Insert before the token at `index`.
    ///
    /// Only positions of existing tokens are accepted; use
    /// [`push`](Self::push) to append. Returns false otherwise, and for an
    /// empty token.
    pub fn insert(&mut self, index: usize, token: impl Into<Token>) -> bool {
        let token = token.into();
        if index < self.tokens.len() && !token.is_empty() {
            self.tokens.insert(index, token);
            true
        } else {
            false
        }
    }

    /// Append a token. Empty tokens are ignored.
    pub fn push(&mut self, token: impl Into<Token>) -> &mut Self {
        let token = token.into();
        if !token.is_empty() {
            self.tokens.push(token);
        }
        self
    }

    /// Remove the token at `index`. Returns false if out of range.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.tokens.len() {
            self.tokens.remove(index);
            true
        } else {
            false
        }
    }

    /// Remove the first token equal to `text`. Returns false if absent.
    pub fn remove_token(&mut self, text: &str) -> bool {
        match self.find_first(text) {
            Some(index) => self.remove(index),
            None => false,
        }
    }

    /// Remove every token.
    pub fn flush(&mut self) {
        self.tokens.clear();
    }

    /// Position of the first token equal to `text`.
    pub fn find_first(&self, text: &str) -> Option<usize> {
        self.tokens.iter().position(|tok| tok == text)
    }

    /// Position of the last token equal to `text`.
    pub fn find_last(&self, text: &str) -> Option<usize> {
        self.tokens.iter().rposition(|tok| tok == text)
    }

    #[deprecated(note = "use `find_last`")]
    pub fn contains(&self, text: &str) -> Option<usize> {
        self.find_last(text)
    }

    /// Drop whitespace tokens, keeping bare newlines if `keep_newlines`.
    pub fn trim(&mut self, keep_newlines: bool) {
        self.tokens
            .retain(|tok| !tok.is_whitespace() || (keep_newlines && tok.is_newline()));
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Render the tokens as text.
    ///
    /// Tokens are separated by a space, except directly after a token that
    /// ends in a newline. A `//` comment is followed by a line break so the
    /// rendered text scans back to the same tokens. Newline tokens are left
    /// out unless `display_newlines` is set.
    pub fn display_str(&self, display_newlines: bool) -> String {
        let mut out = String::new();
        let mut separator = None;
        for tok in self.tokens.iter().filter(|tok| display_newlines || !tok.is_newline()) {
            match separator {
                Some('\n') if tok.is_newline() => {}
                Some(sep) => out.push(sep),
                None => {}
            }
            out.push_str(tok.as_str());
            separator = if tok.ends_with_newline() {
                None
            } else if tok.is_line_comment() {
                Some('\n')
            } else {
                Some(' ')
            };
        }
        out
    }

    /// Write the rendered tokens on their own output line.
    pub fn display(&self, out: &mut impl Write, display_newlines: bool) -> io::Result<()> {
        write!(out, "\n -- {}", self.display_str(display_newlines))
    }
}

impl fmt::Display for SemiExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_str(true))
    }
}

impl Index<usize> for SemiExp {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl IndexMut<usize> for SemiExp {
    fn index_mut(&mut self, index: usize) -> &mut Token {
        &mut self.tokens[index]
    }
}

impl<T: Into<Token>> Extend<T> for SemiExp {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.tokens.extend(non_empty(iter));
    }
}

impl<T: Into<Token>> FromIterator<T> for SemiExp {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tokens: non_empty(iter).collect(),
        }
    }
}

fn non_empty<T: Into<Token>>(iter: impl IntoIterator<Item = T>) -> impl Iterator<Item = Token> {
    iter.into_iter().map(Into::into).filter(|tok| !tok.is_empty())
}

impl IntoIterator for SemiExp {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a SemiExp {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semi(tokens: &[&str]) -> SemiExp {
        tokens.iter().copied().collect()
    }

    #[test]
    fn test_insert_bounds() {
        let mut se = semi(&["a", "c"]);
        assert!(se.insert(1, "b"));
        assert_eq!(se, semi(&["a", "b", "c"]));
        assert!(!se.insert(3, "d"));
        assert_eq!(se.len(), 3);
        assert!(!SemiExp::new().insert(0, "x"));
    }

    #[test]
    fn test_empty_tokens_refused() {
        let mut se = semi(&["a", "", "b"]);
        assert_eq!(se, semi(&["a", "b"]));
        se.push("").push("c");
        assert_eq!(se.len(), 3);
        assert!(!se.insert(0, ""));
        assert!(!se.set(0, String::new()));
        se.extend(["", "d"]);
        assert_eq!(se, semi(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_remove() {
        let mut se = semi(&["x", "=", "x", ";"]);
        assert!(se.remove_token("x"));
        assert_eq!(se, semi(&["=", "x", ";"]));
        assert!(!se.remove_token("y"));
        assert!(se.remove(2));
        assert!(!se.remove(2));
        assert_eq!(se, semi(&["=", "x"]));
    }

    #[test]
    fn test_set_and_index() {
        let mut se = semi(&["a", "+", "b"]);
        assert!(se.set(1, "-"));
        assert!(!se.set(3, "c"));
        se[2] = Token::from("c");
        assert_eq!(se[1], "-");
        assert_eq!(se.get(2).unwrap(), "c");
        assert!(se.get(3).is_none());
    }

    #[test]
    fn test_find() {
        let se = semi(&["a", ";", "b", ";"]);
        assert_eq!(se.find_first(";"), Some(1));
        assert_eq!(se.find_last(";"), Some(3));
        assert_eq!(se.find_first("b"), Some(2));
        assert_eq!(se.find_first("z"), None);
        #[allow(deprecated)]
        let last = se.contains(";");
        assert_eq!(last, Some(3));
    }

    #[test]
    fn test_find_first_checks_last_token() {
        let se = semi(&["a", "#"]);
        assert_eq!(se.find_first("#"), Some(1));
    }

    #[test]
    fn test_push_chains_and_flush() {
        let mut se = SemiExp::new();
        se.push("a").push("b");
        se.extend(["c", "d"]);
        assert_eq!(se.len(), 4);
        se.flush();
        assert!(se.is_empty());
    }

    #[test]
    fn test_equality_requires_same_length() {
        assert_eq!(semi(&["a", "b"]), semi(&["a", "b"]));
        assert_ne!(semi(&["a", "b"]), semi(&["a", "c"]));
        assert_ne!(semi(&["a", "b"]), semi(&["a", "b", "c"]));
        assert_ne!(semi(&["a"]), SemiExp::new());
    }

    #[test]
    fn test_trim() {
        let mut se = semi(&["#", " ", "define", "\n", "X"]);
        se.trim(true);
        assert_eq!(se, semi(&["#", "define", "\n", "X"]));
        let once = se.clone();
        se.trim(true);
        assert_eq!(se, once);
        se.trim(false);
        assert_eq!(se, semi(&["#", "define", "X"]));
    }

    #[test]
    fn test_display_str() {
        let se = semi(&["int", "x", "=", "1", ";"]);
        assert_eq!(se.display_str(false), "int x = 1 ;");

        let se = semi(&["#", "define", "X", "\n", "y"]);
        assert_eq!(se.display_str(true), "# define X \ny");
        assert_eq!(se.display_str(false), "# define X y");
        assert_eq!(se.to_string(), "# define X \ny");
        assert_eq!(SemiExp::new().display_str(true), "");
    }

    #[test]
    fn test_display_breaks_after_line_comment() {
        let se = semi(&["// c", "x", ";"]);
        assert_eq!(se.display_str(false), "// c\nx ;");

        let se = semi(&["x", ";", "// tail"]);
        assert_eq!(se.display_str(false), "x ; // tail");

        let se = semi(&["// c", "\n", "x", "/* b */", "y"]);
        assert_eq!(se.display_str(true), "// c\nx /* b */ y");
        assert_eq!(se.display_str(false), "// c\nx /* b */ y");
    }

    #[test]
    fn test_display_writes_line() {
        let se = semi(&["a", ";"]);
        let mut out = Vec::new();
        se.display(&mut out, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n -- a ;");
    }
}
