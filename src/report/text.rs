//! Plain-text rendering of the combined report

use super::CombinedReport;
use crate::types::ForecastResult;

/// Render the combined report as console text.
///
/// Sections: Forecast, Top Failure Modes, ASOG Compliance. Empty sections
/// print a one-line note instead of a table.
pub fn render_text(report: &CombinedReport) -> String {
    let mut sections = Vec::new();
    let f = &report.forecast;

    // 1. Forecast
    let mut header = vec![format!("RISK FORECAST — {}", report.vessel.name)];
    if !report.vessel.imo.is_empty() {
        header.push(format!("IMO {}", report.vessel.imo));
    }
    header.push(format!(
        "Generated: {}",
        f.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    header.push(format!(
        "Risk level: {}  (mean RPN {:.2}, std dev {:.2}, {} record(s))",
        f.risk_level, f.mean_rpn, f.stddev_rpn, f.record_count
    ));
    header.push(format!("Compliance: {}", f.compliance_status));
    header.push(String::new());
    header.push(f.recommendation.clone());
    sections.push(header.join("\n"));

    // 2. Top failure modes
    let fmea = &report.fmea;
    if fmea.top_risks.is_empty() {
        sections.push(format!("## Top Failure Modes\n\nNo FMEA data ({}).", fmea.source));
    } else {
        let mut lines = vec!["## Top Failure Modes\n".to_string()];
        for r in &fmea.top_risks {
            lines.push(format!(
                "{:>2}. {:<40} S{:>2} O{:>2} D{:>2}  RPN {:>4}",
                r.rank, truncate(&r.label, 40), r.severity, r.occurrence, r.detection, r.rpn
            ));
        }
        if fmea.skipped > 0 {
            lines.push(format!("({} invalid entr(ies) skipped)", fmea.skipped));
        }
        sections.push(lines.join("\n"));
    }

    // 3. Compliance
    let c = &report.compliance;
    let mut lines = vec!["## ASOG Compliance\n".to_string()];
    if c.out_of_limits.is_empty() {
        lines.push(format!(
            "{} parameter(s) checked, none outside limits ({}).",
            c.parameter_count, c.source
        ));
    } else {
        lines.push(format!(
            "{} of {} parameter(s) outside limits:",
            c.out_of_limits.len(),
            c.parameter_count
        ));
        for p in &c.out_of_limits {
            lines.push(format!(
                "- {}: {} (limits {} – {})",
                p.name,
                fmt_value(p.current_value),
                fmt_value(p.min_limit),
                fmt_value(p.max_limit)
            ));
        }
    }
    sections.push(lines.join("\n"));

    sections.join("\n\n")
}

/// One-line summary of a stored forecast, for history listings.
pub fn summary_line(f: &ForecastResult) -> String {
    format!(
        "{}  {:<8}  mean {:>7.2}  sd {:>7.2}  {:<13}  n={}",
        f.generated_at.format("%Y-%m-%d %H:%M:%S"),
        f.risk_level.to_string(),
        f.mean_rpn,
        f.stddev_rpn,
        f.compliance_status.to_string(),
        f.record_count
    )
}

fn fmt_value(v: Option<f64>) -> String {
    v.map_or_else(|| "—".to_string(), |x| format!("{x}"))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
