//! Classification of a p-value against a significance threshold.

use serde::{Deserialize, Serialize};

/// Default significance threshold.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Outcome of a comparison at a given threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// p < alpha: the distributions differ significantly.
    SignificantDifference,
    /// p >= alpha: no significant difference detected.
    NoSignificantDifference,
}

impl Verdict {
    /// Returns true for [`Verdict::SignificantDifference`].
    #[inline]
    pub fn is_significant(self) -> bool {
        matches!(self, Verdict::SignificantDifference)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::SignificantDifference => f.write_str("significant difference (p < alpha)"),
            Verdict::NoSignificantDifference => {
                f.write_str("no significant difference (p >= alpha)")
            }
        }
    }
}

/// Returns [`Verdict::SignificantDifference`] iff `p_value < alpha`.
pub fn classify(p_value: f64, alpha: f64) -> Verdict {
    if p_value < alpha {
        Verdict::SignificantDifference
    } else {
        Verdict::NoSignificantDifference
    }
}
