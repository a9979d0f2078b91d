//! RPN aggregate statistics

use statrs::statistics::Statistics;

use crate::types::FailureRecord;

/// Aggregate RPN statistics over a set of failure records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RpnStatistics {
    /// Records the statistics were computed over
    pub count: usize,
    /// Arithmetic mean RPN
    pub mean: f64,
    /// Population standard deviation of RPN
    pub stddev: f64,
    pub min: u32,
    pub max: u32,
}

impl RpnStatistics {
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean RPN, or `None` when there were no records to average.
    pub const fn mean_if_any(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.mean)
        }
    }
}

/// Mean and population standard deviation of the records' RPN values.
///
/// An empty slice yields all zeros rather than NaN.
pub fn compute_statistics(records: &[FailureRecord]) -> RpnStatistics {
    if records.is_empty() {
        return RpnStatistics::default();
    }

    let rpns: Vec<f64> = records.iter().map(|r| f64::from(r.rpn())).collect();
    let mean = rpns.iter().mean();
    // NaN must never reach the persisted result.
    let stddev = match rpns.iter().population_std_dev() {
        s if s.is_finite() => s,
        _ => 0.0,
    };

    RpnStatistics {
        count: records.len(),
        mean,
        stddev,
        min: records.iter().map(FailureRecord::rpn).min().unwrap_or(0),
        max: records.iter().map(FailureRecord::rpn).max().unwrap_or(0),
    }
}

/// Round to two decimals for persisted output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
