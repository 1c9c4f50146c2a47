//! Drives a [`FeedbackSession`] with a search client and a relevance judge.

use crate::document::{Relevance, ResultRecord};
use crate::error::{Result, RocchioError};
use crate::feedback::session::{FeedbackSession, SessionState};
use crate::feedback::{IterationReport, Termination};
use crate::search::{SearchClient, SearchProvider};

/// Source of relevance judgments, one result at a time.
pub trait RelevanceJudge {
    /// Judge the result shown at 0-based `rank`.
    fn judge(&mut self, rank: usize, record: &ResultRecord) -> Result<Relevance>;
}

impl<F> RelevanceJudge for F
where
    F: FnMut(usize, &ResultRecord) -> Result<Relevance>,
{
    fn judge(&mut self, rank: usize, record: &ResultRecord) -> Result<Relevance> {
        self(rank, record)
    }
}

/// Hooks for reporting session progress. All hooks default to doing nothing.
pub trait SessionObserver {
    /// A search for the session's current query is about to be issued.
    fn iteration_started(&mut self, _session: &FeedbackSession) -> Result<()> {
        Ok(())
    }

    /// Results arrived and are about to be judged.
    fn results_received(&mut self, _results: &[ResultRecord]) -> Result<()> {
        Ok(())
    }

    /// An iteration ended, either with an augmented query or a termination.
    fn iteration_finished(&mut self, _report: &IterationReport) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// Run `session` until it is done and return why it ended.
pub fn run_session<P, J, O>(
    session: &mut FeedbackSession,
    client: &SearchClient<P>,
    judge: &mut J,
    observer: &mut O,
) -> Result<Termination>
where
    P: SearchProvider,
    J: RelevanceJudge + ?Sized,
    O: SessionObserver + ?Sized,
{
    loop {
        match session.state() {
            SessionState::AwaitingSearch => {
                observer.iteration_started(session)?;
                let results = client.search(session.query());
                match session.on_results(results)? {
                    SessionState::Done => notify_finished(session, observer)?,
                    SessionState::CollectingFeedback => {
                        observer.results_received(session.results())?
                    }
                    _ => {}
                }
            }
            SessionState::CollectingFeedback => {
                let relevance = {
                    let (rank, record) = session.pending().ok_or_else(|| {
                        RocchioError::invalid_operation("no result awaiting judgment")
                    })?;
                    judge.judge(rank, record)?
                };
                session.on_judgment(relevance)?;
            }
            SessionState::Deciding => {
                session.decide()?;
                notify_finished(session, observer)?;
            }
            SessionState::Done => {
                return session.termination().cloned().ok_or_else(|| {
                    RocchioError::invalid_operation("session finished without a termination")
                });
            }
        }
    }
}

fn notify_finished<O: SessionObserver + ?Sized>(
    session: &FeedbackSession,
    observer: &mut O,
) -> Result<()> {
    match session.history().last() {
        Some(report) => observer.iteration_finished(report),
        None => Ok(()),
    }
}
