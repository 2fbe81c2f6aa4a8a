//! Result summaries for display and TOML export.

use super::ReportError;
use crate::analysis::{Comparison, Sample, TestResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identifies one compared sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    /// Where the sample came from.
    pub label: String,
    /// Number of intensity values.
    pub pixels: usize,
    /// BLAKE3 digest of the values; ties the report to the exact input.
    pub digest: String,
}

impl SampleSummary {
    pub fn new(label: impl Into<String>, sample: &Sample) -> Self {
        Self {
            label: label.into(),
            pixels: sample.len(),
            digest: sample.digest(),
        }
    }
}

/// Exportable record of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Human-readable verdict.
    pub conclusion: String,
    /// Largest binned CDF gap, at `result.divergence_index`.
    pub max_divergence: f64,
    /// First compared sample.
    pub first: SampleSummary,
    /// Second compared sample.
    pub second: SampleSummary,
    /// Test outcome.
    pub result: TestResult,
}

impl ComparisonReport {
    /// Builds a report stamped with the current time.
    pub fn new(comparison: &Comparison, first: SampleSummary, second: SampleSummary) -> Self {
        Self::with_timestamp(comparison, first, second, Utc::now())
    }

    /// Builds a report with an explicit timestamp.
    pub fn with_timestamp(
        comparison: &Comparison,
        first: SampleSummary,
        second: SampleSummary,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at,
            conclusion: comparison.result.verdict.to_string(),
            max_divergence: comparison.divergence.magnitude,
            first,
            second,
            result: comparison.result,
        }
    }

    /// One-line summary suitable for a status bar.
    pub fn status_line(&self) -> String {
        format!(
            "{} | D = {:.4}, p = {:.4}",
            self.conclusion, self.result.statistic, self.result.p_value
        )
    }

    /// Serializes the report as TOML.
    pub fn to_toml(&self) -> Result<String, ReportError> {
        toml::to_string_pretty(self).map_err(|e| ReportError::Serialize(e.to_string()))
    }

    /// Parses a report previously written by [`ComparisonReport::to_toml`].
    pub fn from_toml(content: &str) -> Result<Self, ReportError> {
        toml::from_str(content).map_err(|e| ReportError::Parse(e.to_string()))
    }

    /// Writes the report as TOML to `path`.
    pub fn write_toml(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let content = self.to_toml()?;
        std::fs::write(path.as_ref(), content)?;
        tracing::info!(path = %path.as_ref().display(), "Wrote comparison report");
        Ok(())
    }
}

impl std::fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = &self.result;
        writeln!(f, "{:<32}{}", "Metric", "Value")?;
        writeln!(f, "{:<32}{}", "Image 1", self.first.label)?;
        writeln!(f, "{:<32}{}", "Image 2", self.second.label)?;
        writeln!(f, "{:<32}{:.4}", "KS statistic (D)", r.statistic)?;
        writeln!(f, "{:<32}{:.4}", "p-value", r.p_value)?;
        writeln!(f, "{:<32}{}", "Significance level (alpha)", r.alpha)?;
        writeln!(
            f,
            "{:<32}{:.2} at level {}",
            "Max CDF difference", self.max_divergence, r.divergence_index
        )?;
        write!(f, "CONCLUSION: {}", self.conclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Verdict, DEFAULT_ALPHA};
    use chrono::TimeZone;

    fn worked_report() -> ComparisonReport {
        let a = Sample::new(vec![0, 0, 0, 0, 10, 10, 10, 10]);
        let b = Sample::new(vec![0, 0, 10, 10, 10, 10, 10, 10]);
        let comparison = Comparison::compute(&a, &b, DEFAULT_ALPHA).unwrap();
        let stamp = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        ComparisonReport::with_timestamp(
            &comparison,
            SampleSummary::new("a.png", &a),
            SampleSummary::new("b.png", &b),
            stamp,
        )
    }

    #[test]
    fn test_table_contents() {
        let text = worked_report().to_string();

        assert!(text.contains("KS statistic (D)"));
        assert!(text.contains("0.2500"));
        assert!(text.contains("Significance level (alpha)      0.05"));
        assert!(text.contains("0.25 at level 0"));
        assert!(text.ends_with("CONCLUSION: no significant difference (p >= alpha)"));
    }

    #[test]
    fn test_status_line() {
        let line = worked_report().status_line();
        assert!(line.starts_with("no significant difference"));
        assert!(line.contains("D = 0.2500"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let report = worked_report();
        let text = report.to_toml().unwrap();

        assert!(text.contains("verdict = \"no_significant_difference\""));
        assert!(text.contains("label = \"a.png\""));

        let parsed = ComparisonReport::from_toml(&text).unwrap();
        assert_eq!(parsed.result.verdict, Verdict::NoSignificantDifference);
        assert_eq!(parsed.first, report.first);
        assert_eq!(parsed.generated_at, report.generated_at);
    }

    #[test]
    fn test_summary_tracks_sample() {
        let sample = Sample::new(vec![1, 2, 3]);
        let summary = SampleSummary::new("x", &sample);
        assert_eq!(summary.pixels, 3);
        assert_eq!(summary.digest.len(), 64);
    }
}
