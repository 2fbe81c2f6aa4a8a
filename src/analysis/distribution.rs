//! Empirical intensity distributions over 256 discrete levels.
//!
//! These binned distributions feed plotting and divergence localization.
//! The exact KS statistic is computed from the raw samples instead
//! (see [`super::statistic`]), since binning would lose resolution for
//! any source that is not already quantized.

use super::{AnalysisError, Sample};

/// Number of intensity levels.
pub const LEVELS: usize = 256;

/// Probability density over the 256 intensity levels.
///
/// Entries sum to 1 within floating tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    density: [f64; LEVELS],
    counts: [u64; LEVELS],
    total: u64,
}

/// Cumulative distribution over the 256 intensity levels.
///
/// Monotonically non-decreasing. A CDF built from a sample ends at exactly 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Cdf {
    cumulative: [f64; LEVELS],
    counts: Option<CumulativeCounts>,
}

/// Running counts behind a sample-built CDF.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CumulativeCounts {
    pub(crate) running: [u64; LEVELS],
    pub(crate) total: u64,
}

impl Histogram {
    /// Builds a density histogram with unit-width bins at each level.
    pub fn from_sample(sample: &Sample) -> Result<Self, AnalysisError> {
        if sample.is_empty() {
            return Err(AnalysisError::EmptySample);
        }

        let counts = level_counts(sample.values());
        let total = sample.len() as u64;
        let n = total as f64;

        let mut density = [0.0; LEVELS];
        for (d, &c) in density.iter_mut().zip(counts.iter()) {
            *d = c as f64 / n;
        }

        Ok(Self {
            density,
            counts,
            total,
        })
    }

    /// Returns the density at each level.
    #[inline]
    pub fn densities(&self) -> &[f64; LEVELS] {
        &self.density
    }

    /// Returns the density at a single level.
    #[inline]
    pub fn get(&self, level: u8) -> f64 {
        self.density[level as usize]
    }

    /// Returns the raw count at each level.
    #[inline]
    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Sum of all densities.
    pub fn total(&self) -> f64 {
        self.density.iter().sum()
    }

    /// Prefix-sums the counts into a CDF.
    ///
    /// Each entry is a single division of a running count by the sample
    /// size, so equal cumulative fractions compare equal.
    pub fn cumulative(&self) -> Cdf {
        let mut running = [0u64; LEVELS];
        let mut sum = 0;
        for (r, &c) in running.iter_mut().zip(self.counts.iter()) {
            sum += c;
            *r = sum;
        }

        let n = self.total as f64;
        let mut cumulative = [0.0; LEVELS];
        for (c, &r) in cumulative.iter_mut().zip(running.iter()) {
            *c = r as f64 / n;
        }

        Cdf {
            cumulative,
            counts: Some(CumulativeCounts {
                running,
                total: self.total,
            }),
        }
    }
}

impl Cdf {
    /// Wraps precomputed cumulative values.
    ///
    /// Callers are responsible for monotonicity; this is mostly useful
    /// for building fixtures and for distributions computed elsewhere.
    pub fn from_values(cumulative: [f64; LEVELS]) -> Self {
        Self {
            cumulative,
            counts: None,
        }
    }

    /// Returns the cumulative probability at each level.
    #[inline]
    pub fn values(&self) -> &[f64; LEVELS] {
        &self.cumulative
    }

    /// Returns the cumulative probability at a single level.
    #[inline]
    pub fn get(&self, level: u8) -> f64 {
        self.cumulative[level as usize]
    }

    pub(crate) fn counts(&self) -> Option<&CumulativeCounts> {
        self.counts.as_ref()
    }

    /// Returns true if no entry is smaller than its predecessor.
    pub fn is_monotonic(&self) -> bool {
        self.cumulative.windows(2).all(|w| w[0] <= w[1])
    }
}

/// Builds the histogram of a sample and its CDF.
pub fn build_distribution(sample: &Sample) -> Result<(Histogram, Cdf), AnalysisError> {
    let histogram = Histogram::from_sample(sample)?;
    let cdf = histogram.cumulative();
    Ok((histogram, cdf))
}

fn level_counts(values: &[u8]) -> [u64; LEVELS] {
    let mut counts = [0u64; LEVELS];
    for &v in values {
        counts[v as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_rejected() {
        let sample = Sample::new(Vec::new());
        assert_eq!(build_distribution(&sample), Err(AnalysisError::EmptySample));
    }

    #[test]
    fn test_boundaries_counted() {
        let sample = Sample::new(vec![0, 0, 255, 255]);
        let (hist, cdf) = build_distribution(&sample).unwrap();

        assert_eq!(hist.get(0), 0.5);
        assert_eq!(hist.get(255), 0.5);
        assert!((hist.total() - 1.0).abs() < 1e-12);
        assert_eq!(cdf.get(0), hist.get(0));
        assert_eq!(cdf.get(254), 0.5);
        assert_eq!(cdf.get(255), 1.0);
    }

    #[test]
    fn test_cdf_is_exact_count_fraction() {
        // 0.1 + 0.1 + 0.1 != 0.3 in floating point; the count form is exact.
        let sample = Sample::new(vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let (hist, cdf) = build_distribution(&sample).unwrap();

        assert_eq!(hist.counts()[3], 1);
        assert_eq!(cdf.get(2), 3.0 / 10.0);
        assert_eq!(cdf.get(6), 7.0 / 10.0);
        assert_eq!(cdf.get(255), 1.0);
    }

    #[test]
    fn test_cdf_monotonic_and_complete() {
        let values: Vec<u8> = (0..10_000u32).map(|i| ((i * 7919) % 251) as u8).collect();
        let (hist, cdf) = build_distribution(&Sample::new(values)).unwrap();

        assert!((hist.total() - 1.0).abs() < 1e-9);
        assert!(cdf.is_monotonic());
        assert_eq!(cdf.get(255), 1.0);
    }

    #[test]
    fn test_single_level() {
        let (hist, cdf) = build_distribution(&Sample::new(vec![42; 17])).unwrap();

        assert_eq!(hist.get(42), 1.0);
        assert_eq!(cdf.get(41), 0.0);
        assert_eq!(cdf.get(42), 1.0);
        assert_eq!(cdf.get(255), 1.0);
    }
}
