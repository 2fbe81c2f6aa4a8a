//! Metrics collection and registry.

use crate::analysis::TestResult;
use crate::session::SessionStats;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// A snapshot of comparison activity for metrics update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Comparisons whose outcome was delivered.
    pub comparisons: u64,
    /// Delivered comparisons with a significant difference.
    pub significant: u64,
    /// Comparisons discarded in favor of a newer submission.
    pub superseded: u64,
    /// Latest KS statistic.
    pub last_statistic: Option<f64>,
    /// Latest p-value.
    pub last_p_value: Option<f64>,
    /// Latest divergence level.
    pub last_divergence_index: Option<u8>,
    /// Combined pixel count of the latest sample pair.
    pub last_sample_pixels: u64,
}

/// Prometheus metrics registry for comparison monitoring.
pub struct MetricsRegistry {
    registry: Registry,

    // Activity counters
    comparisons_total: IntCounter,
    significant_total: IntCounter,
    superseded_total: IntCounter,

    // Latest result
    last_statistic: Gauge,
    last_p_value: Gauge,
    last_divergence_index: IntGauge,
    last_sample_pixels: IntGauge,
}

impl MetricsRegistry {
    /// Creates a new registry with all comparison metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let comparisons_total = IntCounter::new(
            "ks_compare_comparisons_total",
            "Total number of comparisons delivered",
        )?;
        let significant_total = IntCounter::new(
            "ks_compare_significant_total",
            "Comparisons that found a significant difference",
        )?;
        let superseded_total = IntCounter::new(
            "ks_compare_superseded_total",
            "Comparisons discarded because a newer one was submitted",
        )?;

        let last_statistic = Gauge::new(
            "ks_compare_last_statistic",
            "KS statistic D of the latest comparison",
        )?;
        let last_p_value = Gauge::new(
            "ks_compare_last_p_value",
            "Asymptotic p-value of the latest comparison",
        )?;
        let last_divergence_index = IntGauge::new(
            "ks_compare_last_divergence_index",
            "Intensity level of maximum CDF divergence in the latest comparison",
        )?;
        let last_sample_pixels = IntGauge::new(
            "ks_compare_last_sample_pixels",
            "Combined pixel count of the latest sample pair",
        )?;

        registry.register(Box::new(comparisons_total.clone()))?;
        registry.register(Box::new(significant_total.clone()))?;
        registry.register(Box::new(superseded_total.clone()))?;
        registry.register(Box::new(last_statistic.clone()))?;
        registry.register(Box::new(last_p_value.clone()))?;
        registry.register(Box::new(last_divergence_index.clone()))?;
        registry.register(Box::new(last_sample_pixels.clone()))?;

        Ok(Self {
            registry,
            comparisons_total,
            significant_total,
            superseded_total,
            last_statistic,
            last_p_value,
            last_divergence_index,
            last_sample_pixels,
        })
    }

    /// Updates all metrics from a snapshot.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        // Counters only move forward by the difference
        advance(&self.comparisons_total, snapshot.comparisons);
        advance(&self.significant_total, snapshot.significant);
        advance(&self.superseded_total, snapshot.superseded);

        if let Some(d) = snapshot.last_statistic {
            self.last_statistic.set(d);
        }
        if let Some(p) = snapshot.last_p_value {
            self.last_p_value.set(p);
        }
        if let Some(index) = snapshot.last_divergence_index {
            self.last_divergence_index.set(i64::from(index));
        }
        self.last_sample_pixels.set(snapshot.last_sample_pixels as i64);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn advance(counter: &IntCounter, target: u64) {
    let current = counter.get();
    if target > current {
        counter.inc_by(target - current);
    }
}

impl MetricsSnapshot {
    /// Builds a snapshot from session counters and the latest result.
    ///
    /// `significant` is carried by the caller, since the session does not
    /// inspect verdicts.
    pub fn from_session(
        stats: &SessionStats,
        significant: u64,
        latest: Option<(&TestResult, u64)>,
    ) -> Self {
        let (last_statistic, last_p_value, last_divergence_index, last_sample_pixels) = latest
            .map(|(r, pixels)| {
                (
                    Some(r.statistic),
                    Some(r.p_value),
                    Some(r.divergence_index),
                    pixels,
                )
            })
            .unwrap_or((None, None, None, 0));

        Self {
            comparisons: stats.completed,
            significant,
            superseded: stats.superseded,
            last_statistic,
            last_p_value,
            last_divergence_index,
            last_sample_pixels,
        }
    }
}
