//! Tokenizer implementations for text analysis.
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace, keeps punctuation
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//! - [`regex::RegexTokenizer`] - Extracts regex matches
//!
//! # Examples
//!
//! ```
//! use rocchio::analysis::tokenizer::Tokenizer;
//! use rocchio::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world").unwrap().collect();
//! assert_eq!(tokens[0].text, "Hello,");
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;
pub mod whitespace;

pub use regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;

/// Selectable tokenizer for splitting result text before stop-word removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Plain whitespace splitting; punctuation stays attached to words.
    #[default]
    Whitespace,
    /// Unicode (UAX #29) word segmentation; punctuation is dropped.
    UnicodeWord,
    /// Runs of word characters (`\w+`).
    Regex,
}

impl TokenizerKind {
    /// Build the tokenizer this kind names.
    pub fn build(self) -> Result<Arc<dyn Tokenizer>> {
        Ok(match self {
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
            TokenizerKind::Regex => Arc::new(RegexTokenizer::new()?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_kind_build() {
        assert_eq!(TokenizerKind::Whitespace.build().unwrap().name(), "whitespace");
        assert_eq!(TokenizerKind::UnicodeWord.build().unwrap().name(), "unicode_word");
        assert_eq!(TokenizerKind::Regex.build().unwrap().name(), "regex");
    }

    #[test]
    fn test_default_kind_is_whitespace() {
        assert_eq!(TokenizerKind::default(), TokenizerKind::Whitespace);
    }
}
