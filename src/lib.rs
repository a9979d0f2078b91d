//! Nautilus One: vessel risk forecasting
//!
//! Reads an FMEA snapshot and an ASOG compliance snapshot, summarizes the
//! RPN distribution, classifies it into a risk band and writes a
//! `ForecastResult` JSON document with a recommendation.
//!
//! ## Modules
//!
//! - **types**: failure records, compliance parameters, snapshots and the result
//! - **forecast**: loading, statistics, classification and recommendation
//! - **report**: combined report with top risks and out-of-limit parameters
//! - **storage**: forecast JSON file and sled-backed forecast history
//! - **config**: `forecast_config.toml` loading and validation

pub mod config;
pub mod forecast;
pub mod report;
pub mod storage;
pub mod types;

pub use config::ForecastConfig;
pub use forecast::{classify, evaluate_compliance, ForecastRun, RiskForecastEngine};
pub use report::CombinedReport;
pub use storage::{ForecastHistory, StorageError};
pub use types::{
    ComplianceParameter, ComplianceSnapshot, ComplianceStatus, FailureRecord, FmeaSnapshot,
    ForecastResult, RiskLevel, Snapshot,
};
