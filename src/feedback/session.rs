//! Feedback session state machine.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::document::{JudgedSet, Relevance, ResultRecord};
use crate::error::{Result, RocchioError};
use crate::expansion::QueryExpander;
use crate::feedback::{Decision, IterationReport, SessionConfig, Termination};

/// Where a session is in the search → judge → decide cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the results of [`FeedbackSession::query`].
    AwaitingSearch,
    /// Waiting for a judgment of [`FeedbackSession::pending`].
    CollectingFeedback,
    /// Every result is judged; call [`FeedbackSession::decide`].
    Deciding,
    /// Finished; see [`FeedbackSession::termination`].
    Done,
}

/// One relevance-feedback conversation.
///
/// The session owns the current query and the per-iteration state; it
/// performs no I/O. Events arrive through [`on_results`](Self::on_results),
/// [`on_judgment`](Self::on_judgment) and [`decide`](Self::decide), and
/// calling one in the wrong state is an [`RocchioError::InvalidOperation`].
#[derive(Debug)]
pub struct FeedbackSession {
    config: SessionConfig,
    expander: QueryExpander,
    query: String,
    state: SessionState,
    iteration: usize,
    results: Vec<ResultRecord>,
    judged: JudgedSet,
    started_at: DateTime<Utc>,
    history: Vec<IterationReport>,
    termination: Option<Termination>,
}

impl FeedbackSession {
    /// Start a session for `query`.
    pub fn new<S: Into<String>>(
        query: S,
        config: SessionConfig,
        expander: QueryExpander,
    ) -> Result<Self> {
        config.validate()?;
        let query = query.into();
        if query.trim().is_empty() {
            return Err(RocchioError::config("query must not be empty"));
        }

        Ok(FeedbackSession {
            config,
            expander,
            query,
            state: SessionState::AwaitingSearch,
            iteration: 0,
            results: Vec::new(),
            judged: JudgedSet::new(),
            started_at: Utc::now(),
            history: Vec::new(),
            termination: None,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The query to search next (or last searched, once done).
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of iterations started so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Results of the current iteration, in presentation order.
    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    /// Judgments collected so far in the current iteration.
    pub fn judged(&self) -> &JudgedSet {
        &self.judged
    }

    /// The next result awaiting a judgment with its 0-based rank.
    pub fn pending(&self) -> Option<(usize, &ResultRecord)> {
        if self.state != SessionState::CollectingFeedback {
            return None;
        }
        let rank = self.judged.len();
        self.results.get(rank).map(|record| (rank, record))
    }

    pub fn history(&self) -> &[IterationReport] {
        &self.history
    }

    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    /// Feed the results of searching [`query`](Self::query).
    pub fn on_results(&mut self, results: Vec<ResultRecord>) -> Result<SessionState> {
        self.expect_state(SessionState::AwaitingSearch, "accept search results")?;

        self.iteration += 1;
        self.started_at = Utc::now();
        self.judged = JudgedSet::new();
        self.results = results;
        info!(
            "Iteration {}: {} results for {:?}",
            self.iteration,
            self.results.len(),
            self.query
        );

        if self.iteration == 1 && self.results.len() < self.config.min_initial_results {
            self.finish(Termination::TooFewResults {
                count: self.results.len(),
                required: self.config.min_initial_results,
            });
        } else if self.results.is_empty() {
            self.state = SessionState::Deciding;
        } else {
            self.state = SessionState::CollectingFeedback;
        }

        Ok(self.state)
    }

    /// Record the judgment of the [`pending`](Self::pending) result.
    pub fn on_judgment(&mut self, relevance: Relevance) -> Result<SessionState> {
        self.expect_state(SessionState::CollectingFeedback, "accept a judgment")?;

        let record = self.results[self.judged.len()].clone();
        self.judged.push(record, relevance);

        if self.judged.len() == self.results.len() {
            self.state = SessionState::Deciding;
        }
        Ok(self.state)
    }

    /// Measure precision and either augment the query or stop.
    pub fn decide(&mut self) -> Result<Decision> {
        self.expect_state(SessionState::Deciding, "decide")?;

        let judged = std::mem::take(&mut self.judged);
        let precision = judged.precision();

        if judged.relevant().is_empty() {
            return Ok(self.stop(&judged, precision, Termination::NoRelevantResults));
        }

        // Non-empty relevant side implies something was judged.
        let precision_value = precision.unwrap_or_default();
        info!(
            "Iteration {}: precision {:.2} (target {:.2})",
            self.iteration, precision_value, self.config.target_precision
        );

        if precision_value >= self.config.target_precision {
            return Ok(self.stop(
                &judged,
                precision,
                Termination::TargetReached {
                    precision: precision_value,
                },
            ));
        }

        if let Some(limit) = self.config.max_iterations {
            if self.iteration >= limit {
                return Ok(self.stop(
                    &judged,
                    precision,
                    Termination::IterationLimit {
                        iterations: self.iteration,
                    },
                ));
            }
        }

        let expansion = self.expander.expand(&self.query, &judged)?;
        if expansion.is_empty() {
            return Ok(self.stop(&judged, precision, Termination::ExpansionExhausted));
        }

        self.record(&judged, precision, expansion.terms.clone(), None);
        self.query = expansion.query.clone();
        self.results.clear();
        self.state = SessionState::AwaitingSearch;

        Ok(Decision::Continue {
            query: expansion.query,
            added_terms: expansion.terms,
            precision: precision_value,
        })
    }

    fn stop(
        &mut self,
        judged: &JudgedSet,
        precision: Option<f64>,
        termination: Termination,
    ) -> Decision {
        self.record(judged, precision, Vec::new(), Some(termination.clone()));
        self.state = SessionState::Done;
        self.termination = Some(termination.clone());
        info!("Session finished: {termination}");
        Decision::Stop(termination)
    }

    fn finish(&mut self, termination: Termination) {
        let judged = JudgedSet::new();
        self.stop(&judged, None, termination);
    }

    fn record(
        &mut self,
        judged: &JudgedSet,
        precision: Option<f64>,
        added_terms: Vec<String>,
        termination: Option<Termination>,
    ) {
        self.history.push(IterationReport {
            iteration: self.iteration,
            query: self.query.clone(),
            target_precision: self.config.target_precision,
            results: self.results.len(),
            relevant: judged.relevant().len(),
            precision,
            added_terms,
            termination,
            started_at: self.started_at,
        });
    }

    fn expect_state(&self, expected: SessionState, action: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(RocchioError::invalid_operation(format!(
                "cannot {action} while {:?}",
                self.state
            )))
        }
    }
}
