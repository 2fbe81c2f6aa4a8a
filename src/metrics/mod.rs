//! Prometheus metrics for comparison monitoring.
//!
//! Interactive front ends that keep a [`crate::session::ComparisonSession`]
//! alive can expose its activity in Prometheus text format.
//!
//! # Metrics Exposed
//!
//! - `ks_compare_comparisons_total` - Comparisons delivered
//! - `ks_compare_significant_total` - Delivered comparisons with a significant difference
//! - `ks_compare_superseded_total` - Comparisons discarded for a newer submission
//! - `ks_compare_last_statistic` - KS statistic of the latest comparison
//! - `ks_compare_last_p_value` - p-value of the latest comparison
//! - `ks_compare_last_divergence_index` - Level of maximum CDF divergence
//! - `ks_compare_last_sample_pixels` - Combined pixel count of the latest pair
//!
//! # Example
//!
//! ```no_run
//! use ks_image_compare::metrics::{MetricsRegistry, MetricsSnapshot};
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//!
//! let snapshot = MetricsSnapshot {
//!     comparisons: 3,
//!     significant: 1,
//!     superseded: 2,
//!     last_statistic: Some(0.31),
//!     last_p_value: Some(0.004),
//!     last_divergence_index: Some(88),
//!     last_sample_pixels: 614_400,
//! };
//!
//! registry.update(&snapshot);
//! println!("{}", registry.encode().unwrap());
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
