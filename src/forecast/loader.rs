//! FMEA and ASOG snapshot loading
//!
//! Both loaders read a JSON file and never fail: a missing file, an I/O
//! error or unusable JSON is returned as `Snapshot::Absent` with the reason.
//! Field names follow the platform's Portuguese exports (`severidade`,
//! `resultado.conformidade`, ...) with English aliases accepted.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::types::{
    AbsenceReason, ComplianceParameter, ComplianceSnapshot, FailureRecord, FmeaSnapshot, Snapshot,
};

/// Object keys searched, in order, for the FMEA record list.
const FMEA_LIST_KEYS: &[&str] = &[
    "modos_falha",
    "failure_modes",
    "registros",
    "records",
    "fmea",
    "itens",
];

/// JSON pointers searched, in order, for the ASOG parameter list.
const ASOG_PARAMETER_POINTERS: &[&str] = &["/parametros", "/resultado/parametros", "/parameters"];

/// JSON pointers searched, in order, for the overall compliance flag.
const ASOG_FLAG_POINTERS: &[&str] = &["/resultado/conformidade", "/result/compliant"];

#[derive(Debug, Deserialize)]
struct RawFailureRecord {
    #[serde(default, alias = "codigo")]
    id: Option<Value>,
    #[serde(default, alias = "componente", alias = "equipamento")]
    component: Option<String>,
    #[serde(default, alias = "modo_falha", alias = "falha")]
    failure_mode: Option<String>,
    #[serde(default, alias = "severidade")]
    severity: Option<f64>,
    #[serde(default, alias = "ocorrencia")]
    occurrence: Option<f64>,
    #[serde(default, alias = "deteccao")]
    detection: Option<f64>,
    #[serde(default, rename = "RPN", alias = "rpn")]
    stated_rpn: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    #[serde(default, alias = "nome", alias = "parametro")]
    name: Option<String>,
    #[serde(default, alias = "valor_atual", alias = "valor")]
    current_value: Option<f64>,
    #[serde(default, alias = "limite_min")]
    min_limit: Option<f64>,
    #[serde(default, alias = "limite_max")]
    max_limit: Option<f64>,
    #[serde(default, alias = "conforme")]
    compliant: Option<bool>,
}

/// Load an FMEA snapshot from `path`.
pub fn load_fmea(path: &Path) -> Snapshot<FmeaSnapshot> {
    let raw = match read_json(path) {
        Ok(v) => v,
        Err(reason) => return absent(path, "FMEA", reason),
    };
    match parse_fmea(raw) {
        Ok(snapshot) => {
            debug!(
                path = %path.display(),
                records = snapshot.records.len(),
                skipped = snapshot.skipped,
                "FMEA snapshot loaded"
            );
            Snapshot::Loaded(snapshot)
        }
        Err(e) => absent(path, "FMEA", AbsenceReason::Malformed(e)),
    }
}

/// Load an ASOG compliance snapshot from `path`.
pub fn load_asog(path: &Path) -> Snapshot<ComplianceSnapshot> {
    let raw = match read_json(path) {
        Ok(v) => v,
        Err(reason) => return absent(path, "ASOG", reason),
    };
    match parse_asog(&raw) {
        Ok(snapshot) => {
            debug!(
                path = %path.display(),
                overall = ?snapshot.overall,
                parameters = snapshot.parameters.len(),
                "ASOG snapshot loaded"
            );
            Snapshot::Loaded(snapshot)
        }
        Err(e) => absent(path, "ASOG", AbsenceReason::Malformed(e)),
    }
}

/// Extract failure records from a parsed FMEA document.
///
/// Accepts a top-level array, or an object holding the array under one of
/// `FMEA_LIST_KEYS` (falling back to the first array-of-objects value in
/// document order).
/// Entries without three valid factors are skipped and counted.
pub fn parse_fmea(root: Value) -> Result<FmeaSnapshot, String> {
    let entries = match root {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let key = FMEA_LIST_KEYS
                .iter()
                .find(|k| map.get(**k).is_some_and(Value::is_array))
                .map(|k| (*k).to_string())
                .or_else(|| {
                    map.iter()
                        .find(|(_, v)| is_array_of_objects(v))
                        .map(|(k, _)| k.clone())
                })
                .ok_or_else(|| "no failure record list found".to_string())?;
            match map.remove(&key) {
                Some(Value::Array(items)) => items,
                _ => return Err("no failure record list found".to_string()),
            }
        }
        other => return Err(format!("expected array or object, found {}", kind(&other))),
    };

    let mut snapshot = FmeaSnapshot::default();
    for (index, entry) in entries.into_iter().enumerate() {
        match record_from_entry(entry) {
            Ok(record) => snapshot.records.push(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping FMEA entry");
                snapshot.skipped += 1;
            }
        }
    }
    Ok(snapshot)
}

/// Extract the compliance flag and parameters from a parsed ASOG document.
pub fn parse_asog(root: &Value) -> Result<ComplianceSnapshot, String> {
    if !root.is_object() {
        return Err(format!("expected object, found {}", kind(root)));
    }

    let overall = ASOG_FLAG_POINTERS
        .iter()
        .find_map(|p| root.pointer(p))
        .and_then(Value::as_bool);

    let mut parameters = Vec::new();
    let list = ASOG_PARAMETER_POINTERS
        .iter()
        .find_map(|p| root.pointer(p).and_then(Value::as_array));
    if let Some(items) = list {
        for (index, item) in items.iter().enumerate() {
            match RawParameter::deserialize(item) {
                Ok(raw) => parameters.push(parameter_from_raw(raw, index)),
                Err(e) => warn!(index, error = %e, "Skipping ASOG parameter"),
            }
        }
    }

    Ok(ComplianceSnapshot {
        overall,
        parameters,
    })
}

fn record_from_entry(entry: Value) -> Result<FailureRecord, String> {
    let raw = RawFailureRecord::deserialize(entry).map_err(|e| e.to_string())?;
    let record = FailureRecord::from_factors(raw.severity, raw.occurrence, raw.detection)
        .map_err(|e| e.to_string())?
        .with_labels(
            raw.id.map(|v| match v {
                Value::String(s) => s,
                other => other.to_string(),
            }),
            raw.component,
            raw.failure_mode,
        );

    if let Some(stated) = raw.stated_rpn {
        if (stated - f64::from(record.rpn())).abs() > f64::EPSILON {
            warn!(
                stated,
                computed = record.rpn(),
                record = record.label(),
                "Stated RPN disagrees with factors, using computed value"
            );
        }
    }
    Ok(record)
}

fn parameter_from_raw(raw: RawParameter, index: usize) -> ComplianceParameter {
    let name = raw.name.unwrap_or_else(|| format!("parameter {}", index + 1));
    let mut parameter =
        ComplianceParameter::derived(name, raw.current_value, raw.min_limit, raw.max_limit);
    if let Some(flag) = raw.compliant {
        parameter.compliant = flag;
    }
    parameter
}

fn read_json(path: &Path) -> Result<Value, AbsenceReason> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AbsenceReason::NotFound
        } else {
            AbsenceReason::Unreadable(e.to_string())
        }
    })?;
    serde_json::from_str(&contents).map_err(|e| AbsenceReason::Malformed(e.to_string()))
}

fn absent<T>(path: &Path, what: &str, reason: AbsenceReason) -> Snapshot<T> {
    match &reason {
        AbsenceReason::NotFound => {
            debug!(path = %path.display(), "No {} snapshot found", what);
        }
        other => {
            warn!(path = %path.display(), reason = %other, "Ignoring unusable {} snapshot", what);
        }
    }
    Snapshot::Absent(reason)
}

fn is_array_of_objects(v: &Value) -> bool {
    v.as_array()
        .is_some_and(|items| !items.is_empty() && items.iter().all(Value::is_object))
}

const fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn parses_top_level_array_with_portuguese_keys() {
        let doc = json!([
            {"modo_falha": "Perda de propulsão", "severidade": 8, "ocorrencia": 7, "deteccao": 6, "RPN": 336},
            {"severidade": 5, "ocorrencia": 4, "deteccao": 3, "RPN": 60}
        ]);
        let snapshot = parse_fmea(doc).expect("parse");
        assert_eq!(snapshot.skipped, 0);
        let rpns: Vec<u32> = snapshot.records.iter().map(FailureRecord::rpn).collect();
        assert_eq!(rpns, vec![336, 60]);
        assert_eq!(snapshot.records[0].label(), "Perda de propulsão");
    }

    #[test]
    fn finds_list_under_known_key() {
        let doc = json!({
            "embarcacao": "NO-Atlantic",
            "modos_falha": [{"severity": 2, "occurrence": 3, "detection": 4}]
        });
        let snapshot = parse_fmea(doc).expect("parse");
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].rpn(), 24);
    }

    #[test]
    fn falls_back_to_first_array_of_objects() {
        let doc = json!({
            "tags": ["a", "b"],
            "analise": [{"severidade": 10, "ocorrencia": 10, "deteccao": 10}]
        });
        let snapshot = parse_fmea(doc).expect("parse");
        assert_eq!(snapshot.records[0].rpn(), 1000);
    }

    #[test]
    fn fallback_takes_first_list_in_file_order() {
        let doc = json!({
            "zona_b": [{"severidade": 2, "ocorrencia": 2, "deteccao": 2}],
            "analise": [{"severidade": 3, "ocorrencia": 3, "deteccao": 3}]
        });
        let snapshot = parse_fmea(doc).expect("parse");
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].rpn(), 8);
    }

    #[test]
    fn invalid_entries_are_skipped_and_counted() {
        let doc = json!([
            {"severidade": 0, "ocorrencia": 4, "deteccao": 3},
            {"severidade": 5, "ocorrencia": 4},
            {"severidade": "alta", "ocorrencia": 4, "deteccao": 3},
            "not a record",
            {"severidade": 5, "ocorrencia": 4, "deteccao": 3}
        ]);
        let snapshot = parse_fmea(doc).expect("parse");
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.skipped, 4);
    }

    #[test]
    fn stated_rpn_mismatch_uses_computed_value() {
        let doc = json!([{"severidade": 2, "ocorrencia": 2, "deteccao": 2, "RPN": 999}]);
        let snapshot = parse_fmea(doc).expect("parse");
        assert_eq!(snapshot.records[0].rpn(), 8);
    }

    #[test]
    fn scalar_fmea_document_is_malformed() {
        assert!(parse_fmea(json!(42)).is_err());
        assert!(parse_fmea(json!({"vessel": "x"})).is_err());
    }

    #[test]
    fn numeric_id_is_stringified() {
        let doc = json!([{"codigo": 17, "severidade": 1, "ocorrencia": 1, "deteccao": 1}]);
        let snapshot = parse_fmea(doc).expect("parse");
        assert_eq!(snapshot.records[0].id.as_deref(), Some("17"));
    }

    #[test]
    fn asog_reads_flag_and_parameters() {
        let doc = json!({
            "resultado": {
                "conformidade": false,
                "parametros": [
                    {"nome": "Vento", "valor_atual": 32.0, "limite_min": 0.0, "limite_max": 25.0},
                    {"nome": "Geradores", "valor_atual": 3.0, "limite_min": 2.0, "limite_max": 4.0, "conforme": true}
                ]
            }
        });
        let snapshot = parse_asog(&doc).expect("parse");
        assert_eq!(snapshot.overall, Some(false));
        assert_eq!(snapshot.parameters.len(), 2);
        assert!(!snapshot.parameters[0].compliant);
        assert!(snapshot.parameters[1].compliant);
    }

    #[test]
    fn asog_explicit_flag_overrides_derived_one() {
        let doc = json!({
            "parametros": [{"nome": "Corrente", "valor_atual": 1.0, "limite_max": 2.0, "conforme": false}]
        });
        let snapshot = parse_asog(&doc).expect("parse");
        assert_eq!(snapshot.overall, None);
        assert!(!snapshot.parameters[0].compliant);
    }

    #[test]
    fn asog_non_boolean_flag_counts_as_missing() {
        let doc = json!({"resultado": {"conformidade": "sim"}});
        let snapshot = parse_asog(&doc).expect("parse");
        assert_eq!(snapshot.overall, None);
    }

    #[test]
    fn asog_array_root_is_malformed() {
        assert!(parse_asog(&json!([])).is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snap = load_fmea(&dir.path().join("fmea.json"));
        assert_eq!(snap, Snapshot::Absent(AbsenceReason::NotFound));
    }

    #[test]
    fn broken_json_file_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("asog.json");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"{\"resultado\": ").expect("write");
        let snap = load_asog(&path);
        assert!(matches!(snap, Snapshot::Absent(AbsenceReason::Malformed(_))));
    }

    #[test]
    fn directory_path_is_unreadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snap = load_fmea(dir.path());
        assert!(matches!(snap, Snapshot::Absent(AbsenceReason::Unreadable(_))));
    }
}
