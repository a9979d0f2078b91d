//! Config validation: unknown-key detection with Levenshtein suggestions
//! and review of suspicious values.
//!
//! Two-pass parse approach: first parse raw TOML into `toml::Value`, walk
//! the key tree, compare against known field names, and emit warnings with
//! "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;
use std::path::Path;

use super::{defaults, ForecastConfig};

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for ForecastConfig.
///
/// Maintained by hand to match forecast_config.rs; a new field there must be
/// added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [vessel]
        "vessel",
        "vessel.name",
        "vessel.imo",
        "vessel.operator",
        // [inputs]
        "inputs",
        "inputs.fmea_path",
        "inputs.asog_path",
        // [output]
        "output",
        "output.forecast_path",
        "output.history_path",
        "output.history_enabled",
        "output.history_retention_days",
        // [report]
        "report",
        "report.top_risks",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Levenshtein edit distance between two strings, counted in chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (levenshtein(unknown, k), *k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are reported by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Suspicious Values
// ============================================================================

/// Review a parsed config for values that are legal but probably wrong.
pub fn review_values(config: &ForecastConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let output = &config.output.forecast_path;
    for (field, input) in [
        ("inputs.fmea_path", &config.inputs.fmea_path),
        ("inputs.asog_path", &config.inputs.asog_path),
    ] {
        if input == output {
            warnings.push(ValidationWarning {
                field: "output.forecast_path".to_string(),
                message: format!(
                    "output.forecast_path is the same file as {field}; each run will overwrite its own input"
                ),
                suggestion: None,
            });
        }
        if !has_json_extension(input) {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!("{field} = '{}' does not end in .json", input.display()),
                suggestion: None,
            });
        }
    }

    // More than ten years of daily runs is almost certainly a unit mistake.
    if config.output.history_retention_days > 3650 {
        warnings.push(ValidationWarning {
            field: "output.history_retention_days".to_string(),
            message: format!(
                "output.history_retention_days = {} is more than ten years",
                config.output.history_retention_days
            ),
            suggestion: None,
        });
    }

    if config.report.top_risks > defaults::TOP_RISKS * 4 {
        warnings.push(ValidationWarning {
            field: "report.top_risks".to_string(),
            message: format!(
                "report.top_risks = {} makes the console report long",
                config.report.top_risks
            ),
            suggestion: None,
        });
    }

    warnings
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

// ============================================================================
// Tests
// ============================================================================
