//! One-shot comparison of two samples.
//!
//! A [`Comparison`] is computed once and then shared by everything that
//! displays or exports it, so every consumer sees the same numbers.

use super::{
    distribution::{build_distribution, Cdf, Histogram},
    divergence::{divergence, Divergence},
    significance::{classify, Verdict, DEFAULT_ALPHA},
    statistic::{ks_p_value, ks_statistic},
    AnalysisError, Sample,
};
use serde::{Deserialize, Serialize};

/// Result of a two-sample KS comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// KS statistic D in [0, 1].
    pub statistic: f64,
    /// Asymptotic p-value in [0, 1].
    pub p_value: f64,
    /// Significance threshold the verdict was taken at.
    pub alpha: f64,
    /// Classification of `p_value` against `alpha`.
    pub verdict: Verdict,
    /// Intensity level of the largest binned CDF gap.
    pub divergence_index: u8,
}

/// Binned distribution of one side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct SideDistribution {
    /// Number of values in the sample.
    pub len: usize,
    /// Density histogram.
    pub histogram: Histogram,
    /// Cumulative distribution.
    pub cdf: Cdf,
}

/// Everything derived from one pair of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// First sample's distribution.
    pub first: SideDistribution,
    /// Second sample's distribution.
    pub second: SideDistribution,
    /// Largest binned CDF gap.
    pub divergence: Divergence,
    /// Test outcome.
    pub result: TestResult,
}

impl Comparison {
    /// Runs every stage of the comparison once.
    pub fn compute(sample1: &Sample, sample2: &Sample, alpha: f64) -> Result<Self, AnalysisError> {
        let (hist1, cdf1) = build_distribution(sample1)?;
        let (hist2, cdf2) = build_distribution(sample2)?;

        let statistic = ks_statistic(sample1, sample2)?;
        let p_value = ks_p_value(statistic, sample1.len(), sample2.len())?;
        let divergence = divergence(&cdf1, &cdf2);

        let result = TestResult {
            statistic,
            p_value,
            alpha,
            verdict: classify(p_value, alpha),
            divergence_index: divergence.index,
        };

        Ok(Self {
            first: SideDistribution {
                len: sample1.len(),
                histogram: hist1,
                cdf: cdf1,
            },
            second: SideDistribution {
                len: sample2.len(),
                histogram: hist2,
                cdf: cdf2,
            },
            divergence,
            result,
        })
    }

    /// Runs the comparison at [`DEFAULT_ALPHA`].
    pub fn with_default_alpha(sample1: &Sample, sample2: &Sample) -> Result<Self, AnalysisError> {
        Self::compute(sample1, sample2, DEFAULT_ALPHA)
    }
}

/// Compares two samples and returns only the test outcome.
pub fn compare_distributions(
    sample1: &Sample,
    sample2: &Sample,
    alpha: f64,
) -> Result<TestResult, AnalysisError> {
    Comparison::compute(sample1, sample2, alpha).map(|c| c.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let a = Sample::new((0..200u32).map(|i| (i % 256) as u8).collect());
        let result = compare_distributions(&a, &a, DEFAULT_ALPHA).unwrap();

        assert_eq!(result.statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.verdict, Verdict::NoSignificantDifference);
        assert_eq!(result.divergence_index, 0);
    }

    #[test]
    fn test_disjoint_extremes() {
        let a = Sample::new(vec![0; 8]);
        let b = Sample::new(vec![255; 8]);
        let result = compare_distributions(&a, &b, DEFAULT_ALPHA).unwrap();

        assert_eq!(result.statistic, 1.0);
        // n_e = 4 keeps the asymptotic tail at about 1.6e-4.
        assert!(result.p_value < 1e-3, "p = {}", result.p_value);
        assert_eq!(result.verdict, Verdict::SignificantDifference);
        assert_eq!(result.divergence_index, 0);
    }

    #[test]
    fn test_disjoint_extremes_large() {
        let a = Sample::new(vec![0; 64]);
        let b = Sample::new(vec![255; 64]);
        let result = compare_distributions(&a, &b, DEFAULT_ALPHA).unwrap();

        assert_eq!(result.statistic, 1.0);
        assert!(result.p_value < 1e-6);
        assert!(result.verdict.is_significant());
    }

    #[test]
    fn test_worked_example() {
        let a = Sample::new(vec![0, 0, 0, 0, 10, 10, 10, 10]);
        let b = Sample::new(vec![0, 0, 10, 10, 10, 10, 10, 10]);
        let comparison = Comparison::with_default_alpha(&a, &b).unwrap();

        assert!((comparison.result.statistic - 0.25).abs() < 1e-12);
        assert_eq!(comparison.result.verdict, Verdict::NoSignificantDifference);
        assert_eq!(comparison.divergence.index, 0);
        assert!((comparison.divergence.magnitude - 0.25).abs() < 1e-12);
        assert_eq!(comparison.first.len, 8);
    }

    #[test]
    fn test_symmetry() {
        let a = Sample::new((0..300u32).map(|i| ((i * 13) % 200) as u8).collect());
        let b = Sample::new((0..170u32).map(|i| ((i * 29) % 256) as u8).collect());

        let ab = compare_distributions(&a, &b, 0.01).unwrap();
        let ba = compare_distributions(&b, &a, 0.01).unwrap();
        assert_eq!(ab.statistic, ba.statistic);
        assert_eq!(ab.p_value, ba.p_value);
        assert_eq!(ab.verdict, ba.verdict);
    }

    #[test]
    fn test_empty_inputs_fail() {
        let empty = Sample::new(Vec::new());
        let one = Sample::new(vec![1]);

        assert_eq!(
            compare_distributions(&empty, &one, DEFAULT_ALPHA),
            Err(AnalysisError::EmptySample)
        );
        assert_eq!(
            compare_distributions(&one, &empty, DEFAULT_ALPHA),
            Err(AnalysisError::EmptySample)
        );
    }

    #[test]
    fn test_alpha_recorded() {
        let a = Sample::new(vec![1, 2, 3, 4]);
        let b = Sample::new(vec![2, 3, 4, 5]);
        let result = compare_distributions(&a, &b, 0.2).unwrap();
        assert_eq!(result.alpha, 0.2);
    }
}
