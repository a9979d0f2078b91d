//! Forecast output types: RiskLevel, ComplianceStatus, ForecastResult

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk band of the mean RPN
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    /// No failure records were available
    #[default]
    Unknown,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Moderate => write!(f, "MODERATE"),
            RiskLevel::High => write!(f, "HIGH"),
            RiskLevel::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Outcome of the ASOG compliance check
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Compliant,
    OutOfLimits,
    #[default]
    NoData,
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceStatus::Compliant => write!(f, "COMPLIANT"),
            ComplianceStatus::OutOfLimits => write!(f, "OUT_OF_LIMITS"),
            ComplianceStatus::NoData => write!(f, "NO_DATA"),
        }
    }
}

/// Result of one forecast run.
///
/// Created fresh on every run and never updated in place. Field order is the
/// key order of the persisted JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// UTC time the forecast was generated
    pub generated_at: DateTime<Utc>,
    pub risk_level: RiskLevel,
    /// Mean RPN over valid records (0 when there are none), 2 decimals
    pub mean_rpn: f64,
    /// Population standard deviation of RPN (0 when there are none), 2 decimals
    pub stddev_rpn: f64,
    pub compliance_status: ComplianceStatus,
    pub recommendation: String,
    /// Number of failure records behind the statistics
    #[serde(default)]
    pub record_count: usize,
    /// Highest single RPN, 0 when there are no records
    #[serde(default)]
    pub max_rpn: u32,
}

impl ForecastResult {
    /// Structural equality ignoring `generated_at`.
    pub fn same_outcome(&self, other: &Self) -> bool {
        Self {
            generated_at: other.generated_at,
            ..self.clone()
        } == *other
    }
}
