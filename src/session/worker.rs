//! Background comparison dispatch.

use crate::analysis::{AnalysisError, Comparison, Sample};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Outcome of one comparison job.
pub type Outcome = Result<Comparison, AnalysisError>;

/// Handle identifying a submitted comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Submission generation, starting at 1.
    #[inline]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Counters describing session activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Jobs submitted.
    pub submitted: u64,
    /// Jobs whose outcome was delivered.
    pub completed: u64,
    /// Delivered jobs that failed.
    pub failed: u64,
    /// Jobs discarded because a newer one was submitted.
    pub superseded: u64,
    /// Jobs whose worker exited without producing an outcome.
    pub lost: u64,
}

/// Runs comparisons off the calling thread with last-call-wins semantics.
///
/// Each submission snapshots its samples and supersedes every earlier
/// submission. Every job reports on its own channel, and the session only
/// listens to the newest one, so stale outcomes are never observed.
pub struct ComparisonSession {
    latest: u64,
    pending: Option<Receiver<Outcome>>,
    stats: SessionStats,
}

impl ComparisonSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self {
            latest: 0,
            pending: None,
            stats: SessionStats::default(),
        }
    }

    /// Starts a comparison on a worker thread.
    pub fn submit(&mut self, sample1: &Sample, sample2: &Sample, alpha: f64) -> Ticket {
        let (a, b) = (sample1.clone(), sample2.clone());
        let ticket = self.spawn(move || Comparison::compute(&a, &b, alpha));
        tracing::debug!(generation = ticket.0, alpha, "Submitted comparison");
        ticket
    }

    fn spawn<F>(&mut self, job: F) -> Ticket
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        if self.pending.is_some() {
            self.stats.superseded += 1;
            tracing::debug!(generation = self.latest, "Discarding superseded comparison");
        }

        self.latest += 1;
        self.stats.submitted += 1;

        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            // A superseded job finds its receiver gone.
            let _ = sender.send(job());
        });

        self.pending = Some(receiver);
        Ticket(self.latest)
    }

    /// Returns the newest outcome if it has arrived, without blocking.
    pub fn poll(&mut self) -> Option<Outcome> {
        let received = self.pending.as_ref()?.try_recv();
        match received {
            Ok(outcome) => Some(self.deliver(outcome)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.lose();
                None
            }
        }
    }

    /// Blocks until the newest outcome arrives.
    ///
    /// Returns `None` when nothing is outstanding, including when the
    /// worker died before reporting.
    pub fn wait(&mut self) -> Option<Outcome> {
        let received = self.pending.as_ref()?.recv();
        match received {
            Ok(outcome) => Some(self.deliver(outcome)),
            Err(_) => {
                self.lose();
                None
            }
        }
    }

    /// Returns true while the newest submission is still outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns true if `ticket` is the newest submission.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Returns activity counters.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    fn deliver(&mut self, outcome: Outcome) -> Outcome {
        self.pending = None;
        self.stats.completed += 1;
        if let Err(ref e) = outcome {
            self.stats.failed += 1;
            tracing::warn!(generation = self.latest, error = %e, "Comparison failed");
        }
        outcome
    }

    fn lose(&mut self) {
        self.pending = None;
        self.stats.lost += 1;
        tracing::error!(generation = self.latest, "Comparison worker exited without a result");
    }
}

impl Default for ComparisonSession {
    fn default() -> Self {
        Self::new()
    }
}
