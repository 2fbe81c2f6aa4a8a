//! Export of comparison results.
//!
//! Renders the results table, serializes reports to TOML, and writes the
//! per-level distribution table that plotting tools consume. Everything
//! here reads an already-computed [`crate::analysis::Comparison`].

mod summary;
mod table;

pub use summary::{ComparisonReport, SampleSummary};
pub use table::{write_distribution_file, write_distribution_table, TABLE_HEADER};

use thiserror::Error;

/// Errors that can occur while exporting results.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Serialize(String),
    #[error("failed to parse report: {0}")]
    Parse(String),
}
