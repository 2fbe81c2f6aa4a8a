//! KS Image Compare Library
//!
//! Compares the grayscale intensity distributions of two images with a
//! two-sample Kolmogorov-Smirnov test.
//!
//! # Architecture
//!
//! ```text
//! extraction → analysis → report
//!                 ↓
//!       session (background dispatch) → metrics
//! ```
//!
//! # Design Principles
//!
//! - **Exact statistic**: D is computed from the raw samples, never from
//!   the 256-bin plotting histograms
//! - **Explicit inputs**: every comparison takes both samples as arguments
//! - **Compute once**: a [`analysis::Comparison`] is shared by display,
//!   export and metrics
//! - **Distributions only**: no claims about image content or perceptual
//!   similarity
//!
//! # Example
//!
//! ```no_run
//! use ks_image_compare::{
//!     analysis::{Comparison, DEFAULT_ALPHA},
//!     extraction::{acquire_pair, ImageFileSource},
//!     report::{ComparisonReport, SampleSummary},
//! };
//!
//! let mut first = ImageFileSource::new("before.png");
//! let mut second = ImageFileSource::new("after.png");
//! let (a, b) = acquire_pair(&mut first, &mut second).unwrap();
//!
//! let comparison = Comparison::compute(&a, &b, DEFAULT_ALPHA).unwrap();
//! let report = ComparisonReport::new(
//!     &comparison,
//!     SampleSummary::new("before.png", &a),
//!     SampleSummary::new("after.png", &b),
//! );
//! println!("{report}");
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod config;
pub mod extraction;
pub mod metrics;
pub mod report;
pub mod session;

// Re-export commonly used types at crate root
pub use analysis::{
    build_distribution, compare_distributions, locate_divergence, AnalysisError, Cdf, Comparison,
    Histogram, Sample, TestResult, Verdict, DEFAULT_ALPHA,
};
pub use config::FileConfig;
pub use extraction::{ImageFileSource, SampleSource, SyntheticSource};
pub use report::ComparisonReport;
pub use session::ComparisonSession;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
