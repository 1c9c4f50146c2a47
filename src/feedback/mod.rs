//! The relevance-feedback loop as an explicit state machine.
//!
//! ```text
//! AwaitingSearch --results--> CollectingFeedback --last judgment--> Deciding
//!       ^                                                             |
//!       +-------------------- augmented query ------------------------+
//!                                                                     |
//!                                   Done <----- stop -----------------+
//! ```
//!
//! [`FeedbackSession`] holds the state and reacts to events;
//! [`runner::run_session`] drives it with a search client and a judge.

pub mod runner;
pub mod session;

pub use runner::{NoopObserver, RelevanceJudge, SessionObserver, run_session};
pub use session::{FeedbackSession, SessionState};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RocchioError};

/// Settings of one feedback session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Stop once measured precision reaches this value.
    pub target_precision: f64,
    /// The first search must return at least this many results.
    pub min_initial_results: usize,
    /// Stop after this many iterations even if the target was not reached.
    pub max_iterations: Option<usize>,
}

impl SessionConfig {
    pub fn new(target_precision: f64) -> Self {
        SessionConfig {
            target_precision,
            min_initial_results: 10,
            max_iterations: None,
        }
    }

    pub fn with_min_initial_results(mut self, min_initial_results: usize) -> Self {
        self.min_initial_results = min_initial_results;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.target_precision) {
            return Err(RocchioError::config(format!(
                "target precision must be within [0, 1], got {}",
                self.target_precision
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(RocchioError::config("max iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// The first search returned fewer results than required.
    TooFewResults { count: usize, required: usize },
    /// No result of the iteration was judged relevant.
    NoRelevantResults,
    /// Measured precision reached the target.
    TargetReached { precision: f64 },
    /// Expansion found no new term, so the next search would repeat this one.
    ExpansionExhausted,
    /// The configured iteration limit was hit.
    IterationLimit { iterations: usize },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::TooFewResults { count, required } => write!(
                f,
                "Only {count} results in the first iteration, at least {required} needed. Exit."
            ),
            Termination::NoRelevantResults => {
                write!(f, "No relevant documents found in this iteration. Exit.")
            }
            Termination::TargetReached { .. } => write!(f, "Desired precision reached, done"),
            Termination::ExpansionExhausted => {
                write!(f, "No new terms left to augment the query with. Exit.")
            }
            Termination::IterationLimit { iterations } => write!(
                f,
                "Stopped after {iterations} iterations without reaching the desired precision."
            ),
        }
    }
}

/// Outcome of the deciding step.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Search again with the augmented query.
    Continue {
        query: String,
        added_terms: Vec<String>,
        precision: f64,
    },
    /// The session is over.
    Stop(Termination),
}

/// Record of one finished iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Query searched in this iteration.
    pub query: String,
    pub target_precision: f64,
    /// Number of results shown.
    pub results: usize,
    /// Number of results judged relevant.
    pub relevant: usize,
    /// `None` when nothing was judged.
    pub precision: Option<f64>,
    /// Terms added for the next iteration.
    pub added_terms: Vec<String>,
    /// Set when the session ended with this iteration.
    pub termination: Option<Termination>,
    pub started_at: DateTime<Utc>,
}
