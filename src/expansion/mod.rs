//! Rocchio-style query expansion from relevance feedback.
//!
//! The relevant documents of one judged result set are turned into a small
//! TF-IDF corpus; the heaviest term not already in the query is always
//! added, and the runner-up is added only when it clears
//! `second_term_factor × mean(all weights)`.

pub mod expander;
pub mod tfidf;

pub use expander::{Expansion, QueryExpander};
pub use tfidf::{TermWeightTable, TfIdfMatrix, TfIdfVectorizer};

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::TokenizerKind;
use crate::error::{Result, RocchioError};

/// Configuration for query expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// How many times the title is appended after the summary.
    pub title_repeat: usize,
    /// Multiplier on the mean weight that the second term must exceed.
    pub second_term_factor: f64,
    /// Tokenizer used before stop-word removal.
    pub tokenizer: TokenizerKind,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            title_repeat: 2,
            second_term_factor: 1.5,
            tokenizer: TokenizerKind::Whitespace,
        }
    }
}

impl ExpansionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.second_term_factor.is_finite() || self.second_term_factor < 0.0 {
            return Err(RocchioError::config(format!(
                "second term factor must be a non-negative number, got {}",
                self.second_term_factor
            )));
        }
        Ok(())
    }
}
