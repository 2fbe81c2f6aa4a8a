//! Errors raised by the comparison engine.

use thiserror::Error;

/// Errors that abort a single comparison call.
///
/// No partial result is ever produced alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A required sample has no elements, so no distribution is defined.
    #[error("sample is empty: distribution undefined")]
    EmptySample,

    /// A raw value falls outside the 8-bit intensity domain.
    #[error("value {value} at index {index} is outside the intensity range 0-255")]
    OutOfRangeValue {
        /// Position of the offending value in the raw input.
        index: usize,
        /// The offending value.
        value: i128,
    },

    /// The Kolmogorov tail probability could not be evaluated.
    #[error("kolmogorov series did not converge for lambda {lambda} after {terms} terms")]
    NumericInstability {
        /// Scaled statistic the series was evaluated at.
        lambda: f64,
        /// Number of terms summed before giving up.
        terms: usize,
    },
}
