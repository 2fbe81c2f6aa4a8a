//! Location of the largest gap between two binned CDFs.

use super::distribution::CumulativeCounts;
use super::{Cdf, LEVELS};
use serde::{Deserialize, Serialize};

/// The intensity level where two CDFs differ most, and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    /// Intensity level of the maximum absolute difference.
    pub index: u8,
    /// |CDF1 - CDF2| at that level.
    pub magnitude: f64,
}

/// Slack for treating two floating gaps as tied.
///
/// Only used for CDFs wrapped from precomputed values; sample-built CDFs
/// are compared on their exact counts.
pub const TIE_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Finds the level maximizing |cdf1[i] - cdf2[i]|.
///
/// Ties resolve to the lowest level, so annotations are reproducible.
pub fn divergence(cdf1: &Cdf, cdf2: &Cdf) -> Divergence {
    let index = match (cdf1.counts(), cdf2.counts()) {
        (Some(c1), Some(c2)) => exact_argmax(c1, c2),
        _ => tolerant_argmax(cdf1.values(), cdf2.values()),
    };

    Divergence {
        index: index as u8,
        magnitude: (cdf1.values()[index] - cdf2.values()[index]).abs(),
    }
}

/// Compares |r1/n1 - r2/n2| as |r1*n2 - r2*n1| over the shared denominator.
fn exact_argmax(c1: &CumulativeCounts, c2: &CumulativeCounts) -> usize {
    let (n1, n2) = (u128::from(c1.total), u128::from(c2.total));
    let gap = |i: usize| {
        let a = u128::from(c1.running[i]) * n2;
        let b = u128::from(c2.running[i]) * n1;
        a.abs_diff(b)
    };

    let mut best = 0;
    let mut best_gap = gap(0);
    for i in 1..LEVELS {
        let g = gap(i);
        if g > best_gap {
            best = i;
            best_gap = g;
        }
    }
    best
}

fn tolerant_argmax(a: &[f64; LEVELS], b: &[f64; LEVELS]) -> usize {
    let mut best = 0;
    let mut best_magnitude = (a[0] - b[0]).abs();
    for i in 1..LEVELS {
        let magnitude = (a[i] - b[i]).abs();
        if magnitude > best_magnitude + TIE_TOLERANCE {
            best = i;
            best_magnitude = magnitude;
        }
    }
    best
}

/// Returns only the level of [`divergence`].
pub fn locate_divergence(cdf1: &Cdf, cdf2: &Cdf) -> u8 {
    divergence(cdf1, cdf2).index
}
