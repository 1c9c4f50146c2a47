//! Search hits and the relevance judgments collected for them.

use serde::{Deserialize, Serialize};

/// One web search hit, already filtered down to an indexable HTML document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Opaque identifier, unique within a single search response.
    pub url: String,
    /// Human-readable heading; may be empty.
    pub title: String,
    /// Short excerpt; may be empty.
    pub summary: String,
}

impl ResultRecord {
    /// Create a new result record.
    pub fn new<U, T, S>(url: U, title: T, summary: S) -> Self
    where
        U: Into<String>,
        T: Into<String>,
        S: Into<String>,
    {
        ResultRecord {
            url: url.into(),
            title: title.into(),
            summary: summary.into(),
        }
    }
}

/// A binary relevance judgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Relevant,
    NonRelevant,
}

impl Relevance {
    /// Parse a `Y`/`N` answer (case-insensitive, surrounding whitespace ignored).
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim() {
            a if a.eq_ignore_ascii_case("y") => Some(Relevance::Relevant),
            a if a.eq_ignore_ascii_case("n") => Some(Relevance::NonRelevant),
            _ => None,
        }
    }

    pub fn is_relevant(self) -> bool {
        self == Relevance::Relevant
    }
}

/// Partition of one search response into relevant and non-relevant records.
///
/// Built fresh for each iteration and dropped after the expansion step.
/// Record order within each side follows presentation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgedSet {
    relevant: Vec<ResultRecord>,
    non_relevant: Vec<ResultRecord>,
}

impl JudgedSet {
    /// Create an empty judged set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a judgment for `record`.
    pub fn push(&mut self, record: ResultRecord, relevance: Relevance) {
        match relevance {
            Relevance::Relevant => self.relevant.push(record),
            Relevance::NonRelevant => self.non_relevant.push(record),
        }
    }

    /// Records marked relevant.
    pub fn relevant(&self) -> &[ResultRecord] {
        &self.relevant
    }

    /// Records marked not relevant.
    pub fn non_relevant(&self) -> &[ResultRecord] {
        &self.non_relevant
    }

    /// Total number of judged records.
    pub fn len(&self) -> usize {
        self.relevant.len() + self.non_relevant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fraction of judged records marked relevant, or `None` when nothing was judged.
    pub fn precision(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.relevant.len() as f64 / self.len() as f64)
        }
    }
}

impl FromIterator<(ResultRecord, Relevance)> for JudgedSet {
    fn from_iter<I: IntoIterator<Item = (ResultRecord, Relevance)>>(iter: I) -> Self {
        let mut set = JudgedSet::new();
        for (record, relevance) in iter {
            set.push(record, relevance);
        }
        set
    }
}
