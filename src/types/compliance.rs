//! ASOG compliance snapshot types

use serde::{Deserialize, Serialize};

/// One monitored ASOG parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceParameter {
    pub name: String,
    pub current_value: Option<f64>,
    pub min_limit: Option<f64>,
    pub max_limit: Option<f64>,
    pub compliant: bool,
}

impl ComplianceParameter {
    /// Build a parameter whose `compliant` flag is derived from its limits.
    ///
    /// Missing limits are treated as unbounded; a missing current value is
    /// compliant only when there is nothing to compare it against.
    pub fn derived(
        name: impl Into<String>,
        current_value: Option<f64>,
        min_limit: Option<f64>,
        max_limit: Option<f64>,
    ) -> Self {
        let compliant = match current_value {
            Some(v) => {
                min_limit.map_or(true, |min| v >= min) && max_limit.map_or(true, |max| v <= max)
            }
            None => min_limit.is_none() && max_limit.is_none(),
        };
        Self {
            name: name.into(),
            current_value,
            min_limit,
            max_limit,
            compliant,
        }
    }
}

/// Point-in-time ASOG compliance record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    /// Overall flag (`resultado.conformidade`), when the file carries one
    pub overall: Option<bool>,
    /// Parameters in file order
    pub parameters: Vec<ComplianceParameter>,
}

impl ComplianceSnapshot {
    /// Parameters flagged as outside their limits, in file order.
    pub fn out_of_limits(&self) -> impl Iterator<Item = &ComplianceParameter> {
        self.parameters.iter().filter(|p| !p.compliant)
    }
}
