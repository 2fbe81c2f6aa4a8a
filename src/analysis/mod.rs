//! Statistical comparison engine.
//!
//! Builds empirical intensity distributions, computes the exact two-sample
//! Kolmogorov-Smirnov statistic with its asymptotic p-value, locates the
//! level of maximum divergence and classifies the outcome. Everything here
//! is pure and synchronous: no I/O, no logging, no shared state.

mod comparison;
mod distribution;
mod divergence;
mod error;
mod sample;
mod significance;
pub mod statistic;

pub use comparison::{compare_distributions, Comparison, SideDistribution, TestResult};
pub use distribution::{build_distribution, Cdf, Histogram, LEVELS};
pub use divergence::{divergence, locate_divergence, Divergence, TIE_TOLERANCE};
pub use error::AnalysisError;
pub use sample::{Sample, MAX_INTENSITY};
pub use significance::{classify, Verdict, DEFAULT_ALPHA};
pub use statistic::{kolmogorov_lambda, kolmogorov_survival, ks_p_value, ks_statistic};
