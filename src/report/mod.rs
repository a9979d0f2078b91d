//! Combined forecast report
//!
//! Joins the forecast result with the inputs behind it: vessel identity, the
//! highest-RPN failure modes and the ASOG parameters outside their limits.
//! Serializes to JSON for export and renders to plain text for the console.

mod text;

pub use text::{render_text, summary_line};

use serde::Serialize;

use crate::config::VesselInfo;
use crate::forecast::ForecastRun;
use crate::types::{ComplianceParameter, ComplianceStatus, FailureRecord, ForecastResult};

/// One entry of the top-risk table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFailure {
    /// 1-based position in the table
    pub rank: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub severity: u8,
    pub occurrence: u8,
    pub detection: u8,
    pub rpn: u32,
}

/// FMEA side of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FmeaSummary {
    /// Whether the FMEA snapshot was loaded, or why not
    pub source: String,
    pub record_count: usize,
    pub skipped: usize,
    pub min_rpn: u32,
    pub max_rpn: u32,
    pub top_risks: Vec<RankedFailure>,
}

/// ASOG side of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceSummary {
    /// Whether the ASOG snapshot was loaded, or why not
    pub source: String,
    pub status: ComplianceStatus,
    pub parameter_count: usize,
    pub out_of_limits: Vec<ComplianceParameter>,
}

/// Forecast result plus the context behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedReport {
    pub vessel: VesselInfo,
    pub forecast: ForecastResult,
    pub fmea: FmeaSummary,
    pub compliance: ComplianceSummary,
}

impl CombinedReport {
    /// Build a report from a finished run, listing at most `top_n` failure
    /// modes.
    pub fn from_run(run: &ForecastRun, vessel: &VesselInfo, top_n: usize) -> Self {
        let skipped = run.inputs.fmea.loaded().map_or(0, |s| s.skipped);
        let fmea = FmeaSummary {
            source: run.inputs.fmea.describe(),
            record_count: run.statistics.count,
            skipped,
            min_rpn: run.statistics.min,
            max_rpn: run.statistics.max,
            top_risks: rank_failures(run.inputs.records(), top_n),
        };

        let (parameter_count, out_of_limits) = run
            .inputs
            .compliance
            .loaded()
            .map_or((0, Vec::new()), |s| {
                (s.parameters.len(), s.out_of_limits().cloned().collect())
            });
        let compliance = ComplianceSummary {
            source: run.inputs.compliance.describe(),
            status: run.result.compliance_status,
            parameter_count,
            out_of_limits,
        };

        Self {
            vessel: vessel.clone(),
            forecast: run.result.clone(),
            fmea,
            compliance,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Highest-RPN records first; equal RPNs keep file order.
pub fn rank_failures(records: &[FailureRecord], top_n: usize) -> Vec<RankedFailure> {
    let mut sorted: Vec<&FailureRecord> = records.iter().collect();
    // sort_by is stable, so ties stay in file order
    sorted.sort_by(|a, b| b.rpn().cmp(&a.rpn()));
    sorted
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(i, r)| RankedFailure {
            rank: i + 1,
            label: r.label().to_string(),
            component: r.component.clone(),
            severity: r.severity(),
            occurrence: r.occurrence(),
            detection: r.detection(),
            rpn: r.rpn(),
        })
        .collect()
}
