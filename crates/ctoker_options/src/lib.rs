//! ctoker_options: Scanner and semi-expression configuration.
//!
//! Options can be built in code or read from a JSON document such as:
//!
//! ```json
//! {
//!   "scanner": { "specialPairs": ["<<", ">>", "->"] },
//!   "semi": { "returnNewlines": false, "verbose": true }
//! }
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Two-character operators recognized by the punctuation scanner when no
/// configuration overrides them.
pub const DEFAULT_SPECIAL_PAIRS: &[&str] = &[
    "<<", ">>", "::", "==", "*=", "||", "&&", "++", "--", "+=", "-=", "/=",
];

/// Options for the character-level scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScannerOptions {
    /// Two-character punctuators kept together as a single token.
    pub special_pairs: Vec<String>,
    /// Surface whitespace runs containing a line break as a `"\n"` token.
    ///
    /// Only affects a standalone `Tokenizer`. `SemiExpBuilder` always turns
    /// the markers on, since directive lines end at a newline, and uses
    /// [`SemiOptions::return_newlines`] to decide whether they are kept.
    pub return_newlines: bool,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            special_pairs: DEFAULT_SPECIAL_PAIRS.iter().map(|p| p.to_string()).collect(),
            return_newlines: false,
        }
    }
}

impl ScannerOptions {
    /// Check that every special pair is two punctuation characters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pair in &self.special_pairs {
            let mut chars = pair.chars();
            let ok = match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => is_punctuation(a) && is_punctuation(b),
                _ => false,
            };
            if !ok {
                return Err(ConfigError::InvalidPair(pair.clone()));
            }
        }
        Ok(())
    }

    /// Iterate the special pairs as character tuples.
    ///
    /// Entries that are not exactly two characters are skipped.
    pub fn pairs(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.special_pairs.iter().filter_map(|pair| {
            let mut chars = pair.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => Some((a, b)),
                _ => None,
            }
        })
    }
}

/// Options for grouping tokens into semi-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SemiOptions {
    /// Keep newline tokens inside collected semi-expressions.
    pub return_newlines: bool,
    /// Render newline tokens when displaying a semi-expression.
    pub display_newlines: bool,
    /// Drop `//` and `/* */` comments instead of collecting them.
    pub discard_comments: bool,
    /// Log every completed semi-expression.
    pub verbose: bool,
}

impl Default for SemiOptions {
    fn default() -> Self {
        Self {
            return_newlines: true,
            display_newlines: false,
            discard_comments: true,
            verbose: false,
        }
    }
}

/// The full configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub scanner: ScannerOptions,
    pub semi: SemiOptions,
}

/// An error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("special pair {0:?} must be exactly two punctuation characters")]
    InvalidPair(String),
}

/// Parse a configuration document from a string.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;
    config.scanner.validate()?;
    Ok(config)
}

/// Parse a configuration document from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

fn is_punctuation(ch: char) -> bool {
    !ch.is_whitespace() && !ch.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.semi.return_newlines);
        assert!(config.semi.discard_comments);
        assert!(!config.semi.display_newlines);
        assert!(!config.semi.verbose);
        assert!(!config.scanner.return_newlines);
        assert_eq!(config.scanner.special_pairs.len(), DEFAULT_SPECIAL_PAIRS.len());
    }

    #[test]
    fn test_parse_empty_document() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_partial_document() {
        let config = parse_config(
            r#"{ "semi": { "returnNewlines": false, "verbose": true } }"#,
        )
        .unwrap();
        assert!(!config.semi.return_newlines);
        assert!(config.semi.verbose);
        assert!(config.semi.discard_comments);
        assert_eq!(config.scanner, ScannerOptions::default());
    }

    #[test]
    fn test_parse_special_pairs() {
        let config = parse_config(r#"{ "scanner": { "specialPairs": ["->", "!="] } }"#).unwrap();
        let pairs: Vec<_> = config.scanner.pairs().collect();
        assert_eq!(pairs, vec![('-', '>'), ('!', '=')]);
    }

    #[test]
    fn test_invalid_pair_rejected() {
        let err = parse_config(r#"{ "scanner": { "specialPairs": ["<<<"] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPair(ref p) if p == "<<<"));

        let err = parse_config(r#"{ "scanner": { "specialPairs": ["a="] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPair(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_config("{ semi: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctoker.json");
        std::fs::write(&path, r#"{ "semi": { "discardComments": false } }"#).unwrap();
        let config = parse_config_file(&path).unwrap();
        assert!(!config.semi.discard_comments);

        let err = parse_config_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
