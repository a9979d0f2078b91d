//! Risk Forecast Engine
//!
//! Turns an FMEA snapshot and an ASOG compliance snapshot into a
//! `ForecastResult`:
//!
//! ```text
//! load → compute_statistics → classify → evaluate_compliance → recommend
//! ```
//!
//! Loading never fails; missing or broken inputs degrade the result to
//! `UNKNOWN` / `NO_DATA` instead. The only surfaced error is a failed write
//! in `generate_into`.
//!
//! The engine logs through a caller-supplied `tracing::Span` (see
//! `with_span`), entered for each operation, so every event it emits is
//! attributed to the run that produced it.

pub mod loader;
pub mod stats;
pub mod templates;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, info_span, warn, Span};

use crate::config::ForecastConfig;
use crate::storage::{self, StorageError};
use crate::types::thresholds::risk_bands::{HIGH_ABOVE, MODERATE_ABOVE};
use crate::types::{
    ComplianceSnapshot, ComplianceStatus, FailureRecord, FmeaSnapshot, ForecastResult, RiskLevel,
    Snapshot,
};

pub use stats::{compute_statistics, RpnStatistics};
pub use templates::{recommend, RecommendationKind};

/// Both input snapshots for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedInputs {
    pub fmea: Snapshot<FmeaSnapshot>,
    pub compliance: Snapshot<ComplianceSnapshot>,
}

impl LoadedInputs {
    /// Failure records, empty when the FMEA snapshot is absent.
    pub fn records(&self) -> &[FailureRecord] {
        match self.fmea.loaded() {
            Some(snapshot) => &snapshot.records,
            None => &[],
        }
    }
}

/// Everything one run produced: the inputs it saw, the raw statistics and
/// the result. Reports are built from this.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRun {
    pub inputs: LoadedInputs,
    pub statistics: RpnStatistics,
    pub result: ForecastResult,
}

/// Risk forecast engine bound to a pair of input files.
#[derive(Debug, Clone)]
pub struct RiskForecastEngine {
    fmea_path: PathBuf,
    asog_path: PathBuf,
    span: Span,
}

impl RiskForecastEngine {
    pub fn new(fmea_path: impl Into<PathBuf>, asog_path: impl Into<PathBuf>) -> Self {
        let fmea_path = fmea_path.into();
        let asog_path = asog_path.into();
        let span = info_span!("risk_forecast", fmea = %fmea_path.display());
        Self {
            fmea_path,
            asog_path,
            span,
        }
    }

    /// Engine for the input paths named in `config`, logging under a span
    /// tagged with the vessel name.
    pub fn from_config(config: &ForecastConfig) -> Self {
        let span = info_span!("risk_forecast", vessel = %config.vessel.name);
        Self::new(config.inputs.fmea_path.clone(), config.inputs.asog_path.clone()).with_span(span)
    }

    /// Replace the logging span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Read both snapshots. Never fails: unusable files come back `Absent`.
    pub fn load(&self, fmea_path: &Path, asog_path: &Path) -> LoadedInputs {
        let _guard = self.span.enter();
        let inputs = LoadedInputs {
            fmea: loader::load_fmea(fmea_path),
            compliance: loader::load_asog(asog_path),
        };
        info!(
            fmea = %inputs.fmea.describe(),
            asog = %inputs.compliance.describe(),
            records = inputs.records().len(),
            "Forecast inputs loaded"
        );
        inputs
    }

    /// Full pipeline over the engine's own input paths.
    pub fn run(&self) -> ForecastRun {
        let inputs = self.load(&self.fmea_path, &self.asog_path);
        self.run_with(inputs, Utc::now())
    }

    /// Pipeline over already-loaded inputs, stamped with `generated_at`.
    pub fn run_with(&self, inputs: LoadedInputs, generated_at: DateTime<Utc>) -> ForecastRun {
        let _guard = self.span.enter();

        let statistics = compute_statistics(inputs.records());
        // Band comes from the rounded mean: classify(mean_rpn) == risk_level.
        let mean_rpn = stats::round2(statistics.mean);
        let risk_level = classify(statistics.mean_if_any().map(stats::round2));
        let compliance_status = evaluate_compliance(&inputs.compliance);
        let recommendation = recommend(risk_level, compliance_status);

        let result = ForecastResult {
            generated_at,
            risk_level,
            mean_rpn,
            stddev_rpn: stats::round2(statistics.stddev),
            compliance_status,
            recommendation,
            record_count: statistics.count,
            max_rpn: statistics.max,
        };

        info!(
            risk = %result.risk_level,
            compliance = %result.compliance_status,
            mean_rpn = result.mean_rpn,
            stddev_rpn = result.stddev_rpn,
            records = result.record_count,
            "Forecast generated"
        );

        ForecastRun {
            inputs,
            statistics,
            result,
        }
    }

    /// Generate a fresh forecast.
    pub fn generate(&self) -> ForecastResult {
        self.run().result
    }

    /// Generate a fresh forecast and persist it as JSON at `path`.
    ///
    /// The result is returned even when the write fails.
    pub fn generate_into(&self, path: &Path) -> (ForecastResult, Result<(), StorageError>) {
        let result = self.generate();
        let written = self.persist(&result, path);
        (result, written)
    }

    /// Persist a result, logging the outcome under the engine span.
    pub fn persist(&self, result: &ForecastResult, path: &Path) -> Result<(), StorageError> {
        let _guard = self.span.enter();
        match storage::save_forecast(result, path) {
            Ok(()) => {
                info!(path = %path.display(), "Forecast saved");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to save forecast");
                Err(e)
            }
        }
    }
}

/// Map a mean RPN to its risk band.
///
/// `None` means there was no data and yields `Unknown`. Band edges belong
/// to the lower band: 150 is LOW, 200 is MODERATE.
pub fn classify(mean_rpn: Option<f64>) -> RiskLevel {
    match mean_rpn {
        None => RiskLevel::Unknown,
        Some(m) if m.is_nan() => RiskLevel::Unknown,
        Some(m) if m > HIGH_ABOVE => RiskLevel::High,
        Some(m) if m > MODERATE_ABOVE => RiskLevel::Moderate,
        Some(_) => RiskLevel::Low,
    }
}

/// Compliance status of an ASOG snapshot.
///
/// A loaded snapshot without an overall flag counts as compliant.
pub fn evaluate_compliance(snapshot: &Snapshot<ComplianceSnapshot>) -> ComplianceStatus {
    match snapshot.loaded() {
        None => ComplianceStatus::NoData,
        Some(s) if s.overall == Some(false) => ComplianceStatus::OutOfLimits,
        Some(_) => ComplianceStatus::Compliant,
    }
}
