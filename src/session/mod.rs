//! Comparison sessions for interactive callers.
//!
//! An interactive front end should not block its input handling on a
//! comparison, and must never apply a result computed for images the user
//! has since replaced. [`ComparisonSession`] covers both: jobs run on
//! worker threads and only the newest submission's outcome is delivered.

mod worker;

pub use worker::{ComparisonSession, Outcome, SessionStats, Ticket};
