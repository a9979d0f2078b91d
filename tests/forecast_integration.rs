//! Forecast Integration Tests
//!
//! Drives the engine end to end over files on disk: load, classify,
//! recommend, persist and reload, plus the combined report and history.

use std::path::{Path, PathBuf};

use nautilus_forecast::config::ForecastConfig;
use nautilus_forecast::forecast::RecommendationKind;
use nautilus_forecast::report::{render_text, CombinedReport};
use nautilus_forecast::storage::{load_forecast, ForecastHistory};
use nautilus_forecast::types::{AbsenceReason, ComplianceStatus, RiskLevel, Snapshot};
use nautilus_forecast::RiskForecastEngine;

// ============================================================================
// Fixtures
// ============================================================================

const FMEA_PT: &str = r#"{
  "embarcacao": "NO-Atlantic Spirit",
  "modos_falha": [
    { "codigo": "FM-01", "componente": "Thruster 2", "modo_falha": "Vedação do eixo",
      "severidade": 8, "ocorrencia": 7, "deteccao": 6, "RPN": 336 },
    { "codigo": "FM-02", "componente": "Giroscópio", "modo_falha": "Deriva",
      "severidade": 5, "ocorrencia": 4, "deteccao": 3, "RPN": 60 }
  ]
}"#;

const ASOG_COMPLIANT: &str = r#"{
  "resultado": {
    "conformidade": true,
    "parametros": [
      { "nome": "Vento", "valor_atual": 18.0, "limite_min": 0, "limite_max": 25 },
      { "nome": "Geradores em linha", "valor_atual": 3, "limite_min": 2 }
    ]
  }
}"#;

const ASOG_OUT_OF_LIMITS: &str = r#"{
  "resultado": { "conformidade": false },
  "parametros": [
    { "nome": "Vento", "valor_atual": 32.0, "limite_max": 25 },
    { "nome": "Corrente", "valor_atual": 1.1, "limite_max": 2.0 }
  ]
}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

// ============================================================================
// Engine
// ============================================================================

#[test]
fn two_record_scenario_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(dir.path(), "fmea.json", FMEA_PT);
    let asog = write(dir.path(), "asog.json", ASOG_COMPLIANT);

    let result = RiskForecastEngine::new(fmea, asog).generate();

    assert_eq!(result.mean_rpn, 198.0);
    assert_eq!(result.stddev_rpn, 138.0);
    assert_eq!(result.risk_level, RiskLevel::Moderate);
    assert_eq!(result.compliance_status, ComplianceStatus::Compliant);
    assert_eq!(result.recommendation, RecommendationKind::IntensifyMonitoring.text());
}

#[test]
fn english_top_level_array_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(
        dir.path(),
        "fmea.json",
        r#"[
          { "severity": 9, "occurrence": 9, "detection": 3 },
          { "severity": 10, "occurrence": 5, "detection": 5 }
        ]"#,
    );
    let asog = write(dir.path(), "asog.json", ASOG_COMPLIANT);

    let result = RiskForecastEngine::new(fmea, asog).generate();
    // (243 + 250) / 2
    assert_eq!(result.mean_rpn, 246.5);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.recommendation, RecommendationKind::Escalate.text());
}

#[test]
fn missing_fmea_yields_unknown_without_panicking() {
    let dir = tempfile::tempdir().expect("tempdir");
    let asog = write(dir.path(), "asog.json", ASOG_COMPLIANT);

    let run = RiskForecastEngine::new(dir.path().join("absent.json"), asog).run();

    assert_eq!(run.inputs.fmea, Snapshot::Absent(AbsenceReason::NotFound));
    assert_eq!(run.result.mean_rpn, 0.0);
    assert_eq!(run.result.stddev_rpn, 0.0);
    assert_eq!(run.result.risk_level, RiskLevel::Unknown);
    assert_eq!(run.result.compliance_status, ComplianceStatus::Compliant);
}

#[test]
fn malformed_fmea_is_absent_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(dir.path(), "fmea.json", "{ \"modos_falha\": [ ");
    let asog = write(dir.path(), "asog.json", ASOG_COMPLIANT);

    let run = RiskForecastEngine::new(fmea, asog).run();
    assert!(matches!(run.inputs.fmea, Snapshot::Absent(AbsenceReason::Malformed(_))));
    assert_eq!(run.result.risk_level, RiskLevel::Unknown);
}

#[test]
fn absent_asog_is_no_data_and_high_risk_still_escalates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(
        dir.path(),
        "fmea.json",
        r#"{ "registros": [ { "severidade": 9, "ocorrencia": 8, "deteccao": 7 } ] }"#,
    );

    let result = RiskForecastEngine::new(fmea, dir.path().join("asog.json")).generate();
    assert_eq!(result.compliance_status, ComplianceStatus::NoData);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.recommendation, RecommendationKind::Escalate.text());
}

#[test]
fn out_of_limits_escalates_even_at_low_risk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(
        dir.path(),
        "fmea.json",
        r#"[ { "severidade": 2, "ocorrencia": 2, "deteccao": 2 } ]"#,
    );
    let asog = write(dir.path(), "asog.json", ASOG_OUT_OF_LIMITS);

    let result = RiskForecastEngine::new(fmea, asog).generate();
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.compliance_status, ComplianceStatus::OutOfLimits);
    assert_eq!(result.recommendation, RecommendationKind::Escalate.text());
}

#[test]
fn invalid_entries_are_skipped_and_counted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(
        dir.path(),
        "fmea.json",
        r#"[
          { "severidade": 8, "ocorrencia": 7, "deteccao": 6 },
          { "severidade": 0, "ocorrencia": 7, "deteccao": 6 },
          { "severidade": 5, "ocorrencia": 4 },
          { "severidade": 5, "ocorrencia": 4, "deteccao": 3 }
        ]"#,
    );
    let run = RiskForecastEngine::new(fmea, dir.path().join("asog.json")).run();

    let snapshot = run.inputs.fmea.loaded().expect("loaded");
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.skipped, 2);
    assert_eq!(run.result.mean_rpn, 198.0);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn generate_persist_reload_is_structurally_equal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(dir.path(), "fmea.json", FMEA_PT);
    let asog = write(dir.path(), "asog.json", ASOG_OUT_OF_LIMITS);
    let out = dir.path().join("out").join("risk_forecast.json");

    let (result, written) = RiskForecastEngine::new(fmea, asog).generate_into(&out);
    written.expect("forecast written");

    match load_forecast(&out) {
        Snapshot::Loaded(reloaded) => {
            assert_eq!(reloaded, result);
            assert!(reloaded.same_outcome(&result));
        }
        Snapshot::Absent(reason) => panic!("reload failed: {reason}"),
    }

    let json = std::fs::read_to_string(&out).expect("read back");
    assert!(json.contains("\"risk_level\": \"MODERATE\""));
    assert!(json.contains("\"compliance_status\": \"OUT_OF_LIMITS\""));
}

#[test]
fn history_keeps_runs_newest_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let fmea = write(dir.path(), "fmea.json", FMEA_PT);
    let asog = write(dir.path(), "asog.json", ASOG_COMPLIANT);
    let engine = RiskForecastEngine::new(&fmea, &asog);
    let history = ForecastHistory::open(dir.path().join("history.db")).expect("open history");

    let first = engine.generate();
    history.record(&first).expect("record");
    std::thread::sleep(std::time::Duration::from_millis(5));

    write(dir.path(), "fmea.json", r#"[ { "severidade": 10, "ocorrencia": 10, "deteccao": 10 } ]"#);
    let second = engine.generate();
    history.record(&second).expect("record");

    assert_eq!(history.count(), 2);
    let recent = history.recent(10);
    assert_eq!(recent[0].risk_level, RiskLevel::High);
    assert_eq!(recent[1].risk_level, RiskLevel::Moderate);
    assert_eq!(history.latest(), Some(second));
}

// ============================================================================
// Combined Report
// ============================================================================

#[test]
fn combined_report_from_configured_engine() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = ForecastConfig::default();
    config.vessel.name = "NO-Atlantic Spirit".to_string();
    config.inputs.fmea_path = write(dir.path(), "fmea.json", FMEA_PT);
    config.inputs.asog_path = write(dir.path(), "asog.json", ASOG_OUT_OF_LIMITS);
    config.report.top_risks = 1;

    let run = RiskForecastEngine::from_config(&config).run();
    let report = CombinedReport::from_run(&run, &config.vessel, config.report.top_risks);

    assert_eq!(report.fmea.top_risks.len(), 1);
    assert_eq!(report.fmea.top_risks[0].label, "Vedação do eixo");
    assert_eq!(report.fmea.top_risks[0].rpn, 336);
    assert_eq!(report.compliance.parameter_count, 2);
    assert_eq!(report.compliance.out_of_limits.len(), 1);
    assert_eq!(report.compliance.out_of_limits[0].name, "Vento");

    let text = render_text(&report);
    assert!(text.contains("NO-Atlantic Spirit"));
    assert!(text.contains("Vedação do eixo"));
    assert!(text.contains("ESCALATE:"));

    let json = report.to_json().expect("serialize report");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(value["forecast"]["mean_rpn"], 198.0);
    assert_eq!(value["vessel"]["name"], "NO-Atlantic Spirit");
}
