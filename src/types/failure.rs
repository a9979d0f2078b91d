//! FMEA failure records

use serde::Serialize;

use super::thresholds::rpn_limits::{FACTOR_MAX, FACTOR_MIN};

/// Why a raw FMEA entry could not become a `FailureRecord`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("missing factor '{0}'")]
    MissingFactor(&'static str),
    #[error("factor '{name}' = {value} is outside 1-10")]
    OutOfRange { name: &'static str, value: f64 },
}

/// One FMEA failure mode.
///
/// The three factors are range-checked on construction and cannot be changed
/// afterwards, so `rpn()` is always within 1-1000.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    /// Identifier from the source file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Equipment or system the failure mode belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Short failure mode description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_mode: Option<String>,
    severity: u8,
    occurrence: u8,
    detection: u8,
}

impl FailureRecord {
    /// Build a record from the three FMEA factors (each 1-10).
    pub fn new(severity: u8, occurrence: u8, detection: u8) -> Result<Self, RecordError> {
        Ok(Self {
            id: None,
            component: None,
            failure_mode: None,
            severity: check_factor("severity", f64::from(severity))?,
            occurrence: check_factor("occurrence", f64::from(occurrence))?,
            detection: check_factor("detection", f64::from(detection))?,
        })
    }

    /// Build a record from numeric JSON values, rejecting missing,
    /// fractional or out-of-range factors.
    pub fn from_factors(
        severity: Option<f64>,
        occurrence: Option<f64>,
        detection: Option<f64>,
    ) -> Result<Self, RecordError> {
        let s = severity.ok_or(RecordError::MissingFactor("severity"))?;
        let o = occurrence.ok_or(RecordError::MissingFactor("occurrence"))?;
        let d = detection.ok_or(RecordError::MissingFactor("detection"))?;
        Ok(Self {
            id: None,
            component: None,
            failure_mode: None,
            severity: check_factor("severity", s)?,
            occurrence: check_factor("occurrence", o)?,
            detection: check_factor("detection", d)?,
        })
    }

    #[must_use]
    pub fn with_labels(
        mut self,
        id: Option<String>,
        component: Option<String>,
        failure_mode: Option<String>,
    ) -> Self {
        self.id = id;
        self.component = component;
        self.failure_mode = failure_mode;
        self
    }

    pub const fn severity(&self) -> u8 {
        self.severity
    }

    pub const fn occurrence(&self) -> u8 {
        self.occurrence
    }

    pub const fn detection(&self) -> u8 {
        self.detection
    }

    /// Risk Priority Number: severity × occurrence × detection.
    pub fn rpn(&self) -> u32 {
        u32::from(self.severity) * u32::from(self.occurrence) * u32::from(self.detection)
    }

    /// Label for reports: failure mode, then component, then id.
    pub fn label(&self) -> &str {
        self.failure_mode
            .as_deref()
            .or(self.component.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("unnamed failure mode")
    }
}

/// Failure records parsed from one FMEA file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FmeaSnapshot {
    /// Valid records in file order
    pub records: Vec<FailureRecord>,
    /// Entries dropped for missing or out-of-range factors
    pub skipped: usize,
}

// Range-checked before the cast, so the conversion is exact.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn check_factor(name: &'static str, value: f64) -> Result<u8, RecordError> {
    let in_range = value.is_finite()
        && value.fract() == 0.0
        && value >= f64::from(FACTOR_MIN)
        && value <= f64::from(FACTOR_MAX);
    if !in_range {
        return Err(RecordError::OutOfRange { name, value });
    }
    Ok(value as u8)
}
