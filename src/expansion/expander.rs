//! Query expander: picks zero, one, or two new terms for the next search.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::document::{JudgedSet, ResultRecord};
use crate::error::Result;
use crate::expansion::ExpansionConfig;
use crate::expansion::tfidf::{TermWeightTable, TfIdfVectorizer};

/// Result of one expansion step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    /// The original query followed by the added terms.
    pub query: String,
    /// Added terms in selection order (0, 1, or 2 entries).
    pub terms: Vec<String>,
}

impl Expansion {
    fn unchanged(query: &str) -> Self {
        Expansion {
            query: query.to_string(),
            terms: Vec::new(),
        }
    }

    fn with_terms(query: &str, terms: Vec<String>) -> Self {
        if terms.is_empty() {
            return Self::unchanged(query);
        }
        Expansion {
            query: format!("{} {}", query, terms.join(" ")),
            terms,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Term-weighting and selection engine.
///
/// Owns its stop-word list; no file system access happens after
/// construction.
///
/// # Examples
///
/// ```
/// use rocchio::document::ResultRecord;
/// use rocchio::expansion::QueryExpander;
///
/// let expander = QueryExpander::with_defaults().unwrap();
/// let relevant = vec![
///     ResultRecord::new("https://a.example", "Jaguar cars", "Jaguar luxury cars and sedans"),
///     ResultRecord::new("https://b.example", "Jaguar sedans", "New Jaguar cars for sale"),
/// ];
///
/// let expansion = expander.expand_relevant("jaguar", &relevant).unwrap();
/// assert_eq!(expansion.terms[0], "cars");
/// assert!(expansion.query.starts_with("jaguar cars"));
/// ```
#[derive(Debug, Clone)]
pub struct QueryExpander {
    config: ExpansionConfig,
    analyzer: PipelineAnalyzer,
    vectorizer: TfIdfVectorizer,
}

impl QueryExpander {
    /// Create an expander with the given stop words and configuration.
    pub fn new(stop_filter: StopFilter, config: ExpansionConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = PipelineAnalyzer::new(config.tokenizer.build()?)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter))
            .with_name("feedback_document");

        Ok(QueryExpander {
            config,
            analyzer,
            vectorizer: TfIdfVectorizer::new()?,
        })
    }

    /// Create an expander with the built-in English stop words and default settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(StopFilter::new(), ExpansionConfig::default())
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Lowercased, stop-word-free text of one relevant document: the summary
    /// followed by the title repeated `title_repeat` times.
    pub fn process_document(&self, record: &ResultRecord) -> Result<String> {
        let mut text = record.summary.clone();
        for _ in 0..self.config.title_repeat {
            text.push(' ');
            text.push_str(&record.title);
        }
        Ok(self.analyzer.terms(&text)?.join(" "))
    }

    /// Terms of `query` that must never be re-selected.
    pub fn query_terms(&self, query: &str) -> BTreeSet<String> {
        let mut terms: BTreeSet<String> = query.split_whitespace().map(str::to_lowercase).collect();
        terms.extend(self.vectorizer.terms(query));
        terms
    }

    /// Aggregate TF-IDF weights over `relevant`, with query terms zeroed.
    pub fn term_weights(&self, query: &str, relevant: &[ResultRecord]) -> Result<TermWeightTable> {
        let documents = relevant
            .iter()
            .map(|record| self.process_document(record))
            .collect::<Result<Vec<_>>>()?;

        let mut table = self.vectorizer.fit_transform(&documents).column_sums();
        let zeroed = table.zero_terms(self.query_terms(query));
        debug!(
            "Weighted {} terms over {} relevant documents, zeroed {} query terms",
            table.len(),
            documents.len(),
            zeroed
        );
        Ok(table)
    }

    /// Expand `query` using the relevant side of `judged`.
    pub fn expand(&self, query: &str, judged: &JudgedSet) -> Result<Expansion> {
        self.expand_relevant(query, judged.relevant())
    }

    /// Expand `query` from the given relevant documents.
    ///
    /// An empty document list, or one yielding no term outside the query,
    /// returns the query unchanged with no added terms.
    pub fn expand_relevant(&self, query: &str, relevant: &[ResultRecord]) -> Result<Expansion> {
        if relevant.is_empty() {
            warn!("No relevant documents to expand {query:?} from");
            return Ok(Expansion::unchanged(query));
        }

        let table = self.term_weights(query, relevant)?;
        let ranked = table.ranked();

        let Some(&(first, first_weight)) = ranked.first() else {
            warn!("No candidate terms survived weighting for {query:?}");
            return Ok(Expansion::unchanged(query));
        };

        let threshold = self.config.second_term_factor * table.mean();
        let mut terms = vec![first.to_string()];
        debug!("First term {first:?} ({first_weight:.4}), threshold {threshold:.4}");

        if let Some(&(second, second_weight)) = ranked.get(1) {
            debug!("Second candidate {second:?} ({second_weight:.4})");
            if second_weight > threshold {
                terms.push(second.to_string());
            }
        }

        let expansion = Expansion::with_terms(query, terms);
        info!("Augmenting {:?} by {:?}", query, expansion.terms);
        Ok(expansion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tokenizer::TokenizerKind;
    use crate::document::Relevance;

    fn record(title: &str, summary: &str) -> ResultRecord {
        ResultRecord::new("https://example.com", title, summary)
    }

    #[test]
    fn test_process_document_repeats_title() {
        let expander = QueryExpander::with_defaults().unwrap();
        let doc = expander
            .process_document(&record("Rust Book", "The guide to Rust"))
            .unwrap();
        assert_eq!(doc, "guide rust rust book rust book");
    }

    #[test]
    fn test_process_document_keeps_punctuation_from_whitespace_split() {
        let expander = QueryExpander::with_defaults().unwrap();
        let doc = expander.process_document(&record("", "Cats, the animals.")).unwrap();
        assert_eq!(doc, "cats, animals.");
    }

    #[test]
    fn test_unicode_tokenizer_option() {
        let config = ExpansionConfig {
            tokenizer: TokenizerKind::UnicodeWord,
            ..Default::default()
        };
        let expander = QueryExpander::new(StopFilter::new(), config).unwrap();
        let doc = expander.process_document(&record("", "Cats, the animals.")).unwrap();
        assert_eq!(doc, "cats animals");
    }

    #[test]
    fn test_query_terms_include_both_splits() {
        let expander = QueryExpander::with_defaults().unwrap();
        let terms = expander.query_terms("Cat's toy");
        assert!(terms.contains("cat's"));
        assert!(terms.contains("cat"));
        assert!(terms.contains("toy"));
    }

    #[test]
    fn test_hyphenated_query_parts_are_not_reselected() {
        let expander = QueryExpander::with_defaults().unwrap();
        let terms = expander.query_terms("Jaguar-XJ");
        assert!(terms.contains("jaguar-xj"));
        assert!(terms.contains("jaguar"));
        assert!(terms.contains("xj"));

        let relevant = [
            record("Jaguar XJ", "jaguar xj luxury sedan"),
            record("XJ review", "jaguar xj sedan"),
        ];
        let expansion = expander.expand_relevant("jaguar-xj", &relevant).unwrap();
        assert_eq!(expansion.terms[0], "review");
        assert!(
            !expansion
                .terms
                .iter()
                .any(|t| t == "jaguar" || t == "xj")
        );
    }

    #[test]
    fn test_empty_relevant_set() {
        let expander = QueryExpander::with_defaults().unwrap();
        let expansion = expander.expand("rust", &JudgedSet::new()).unwrap();
        assert_eq!(expansion.query, "rust");
        assert!(expansion.is_empty());
    }

    #[test]
    fn test_only_query_terms_yields_no_expansion() {
        let expander = QueryExpander::with_defaults().unwrap();
        let expansion = expander
            .expand_relevant("rust", &[record("Rust", "rust RUST")])
            .unwrap();
        assert_eq!(expansion.query, "rust");
        assert!(expansion.terms.is_empty());
    }

    #[test]
    fn test_single_candidate_has_no_second_term() {
        let expander = QueryExpander::with_defaults().unwrap();
        let expansion = expander
            .expand_relevant("rust", &[record("Rust", "rust compiler")])
            .unwrap();
        assert_eq!(expansion.terms, vec!["compiler"]);
        assert_eq!(expansion.query, "rust compiler");
    }

    #[test]
    fn test_expand_uses_only_relevant_side() {
        let expander = QueryExpander::with_defaults().unwrap();
        let mut judged = JudgedSet::new();
        judged.push(record("Ferris crab", "ferris mascot"), Relevance::Relevant);
        judged.push(record("Cargo cargo cargo", "cargo cargo"), Relevance::NonRelevant);

        let expansion = expander.expand("rust", &judged).unwrap();
        assert_eq!(expansion.terms[0], "ferris");
        assert!(!expansion.terms.iter().any(|t| t == "cargo"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ExpansionConfig {
            second_term_factor: -1.0,
            ..Default::default()
        };
        assert!(QueryExpander::new(StopFilter::new(), config).is_err());
    }
}
