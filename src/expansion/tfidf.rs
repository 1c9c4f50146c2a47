//! TF-IDF weighting over a small corpus of processed documents.
//!
//! Each processed document is one corpus unit. Term frequency is the raw
//! count, IDF is smoothed as `ln((1 + n) / (1 + df)) + 1`, and every
//! document vector is L2-normalised. Summing the normalised vectors column
//! by column gives a [`TermWeightTable`].

use std::collections::BTreeSet;

use ahash::AHashMap;

use crate::analysis::tokenizer::RegexTokenizer;
use crate::error::Result;

/// Word pattern for vocabulary terms: two or more word characters.
pub const DEFAULT_TERM_PATTERN: &str = r"\b\w\w+\b";

/// Splits processed documents into vocabulary terms and weights them.
#[derive(Clone, Debug)]
pub struct TfIdfVectorizer {
    tokenizer: RegexTokenizer,
}

impl TfIdfVectorizer {
    /// Create a vectorizer using [`DEFAULT_TERM_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_TERM_PATTERN)
    }

    /// Create a vectorizer with a custom term pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(TfIdfVectorizer {
            tokenizer: RegexTokenizer::with_pattern(pattern)?,
        })
    }

    /// Lowercased vocabulary terms of `text`, in order of appearance.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.tokenizer.terms(&lowered).map(str::to_string).collect()
    }

    /// Learn the vocabulary of `documents` and weight every document against it.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfIdfMatrix {
        let counts: Vec<AHashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = AHashMap::new();
                for term in self.terms(doc.as_ref()) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let vocabulary: Vec<String> = counts
            .iter()
            .flat_map(|tf| tf.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: AHashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for tf in &counts {
            for term in tf.keys() {
                document_frequency[index[term.as_str()]] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row: Vec<(usize, f64)> = tf
                    .iter()
                    .map(|(term, &count)| {
                        let i = index[term.as_str()];
                        (i, count as f64 * idf[i])
                    })
                    .collect();
                row.sort_unstable_by_key(|&(i, _)| i);

                let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in &mut row {
                        *w /= norm;
                    }
                }
                row
            })
            .collect();

        TfIdfMatrix {
            vocabulary,
            idf,
            rows,
        }
    }
}

/// Sparse document-by-term weight matrix produced by [`TfIdfVectorizer`].
#[derive(Clone, Debug)]
pub struct TfIdfMatrix {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl TfIdfMatrix {
    /// Vocabulary terms, sorted lexicographically.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn n_documents(&self) -> usize {
        self.rows.len()
    }

    /// Smoothed inverse document frequency of `term`.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.position(term).map(|i| self.idf[i])
    }

    /// Normalised weight of `term` in document `doc`; zero when absent.
    pub fn weight(&self, doc: usize, term: &str) -> f64 {
        let (Some(row), Some(i)) = (self.rows.get(doc), self.position(term)) else {
            return 0.0;
        };
        row.binary_search_by_key(&i, |&(j, _)| j)
            .map(|k| row[k].1)
            .unwrap_or(0.0)
    }

    /// Sum each term's weight across all documents.
    pub fn column_sums(&self) -> TermWeightTable {
        let mut weights = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for &(i, w) in row {
                weights[i] += w;
            }
        }
        TermWeightTable {
            terms: self.vocabulary.clone(),
            weights,
        }
    }

    fn position(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }
}

/// Aggregate weight per vocabulary term.
///
/// Terms are kept in lexicographic order. Zeroed entries stay in the table
/// and still count towards [`TermWeightTable::mean`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TermWeightTable {
    terms: Vec<String>,
    weights: Vec<f64>,
}

impl TermWeightTable {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Aggregate weight of `term`, if it is in the vocabulary.
    pub fn weight(&self, term: &str) -> Option<f64> {
        self.terms
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
            .map(|i| self.weights[i])
    }

    /// `(term, weight)` pairs in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.terms
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
    }

    /// Set the weight of every listed term to zero. Returns how many
    /// vocabulary entries were zeroed.
    pub fn zero_terms<I, S>(&mut self, terms: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut zeroed = 0;
        for term in terms {
            if let Ok(i) = self.terms.binary_search_by(|t| t.as_str().cmp(term.as_ref())) {
                if self.weights[i] != 0.0 {
                    zeroed += 1;
                }
                self.weights[i] = 0.0;
            }
        }
        zeroed
    }

    /// Mean over every entry, zeroed ones included; zero for an empty table.
    pub fn mean(&self) -> f64 {
        if self.weights.is_empty() {
            0.0
        } else {
            self.weights.iter().sum::<f64>() / self.weights.len() as f64
        }
    }

    /// Entries with a positive weight, heaviest first. Equal weights are
    /// ordered by term, ascending.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().filter(|&(_, w)| w > 0.0).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
