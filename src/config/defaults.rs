//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery. Every value here is the default
//! for a `forecast_config.toml` field of the same meaning.

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "NAUTILUS_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "forecast_config.toml";

// ============================================================================
// Inputs
// ============================================================================

/// FMEA snapshot exported by the maintenance module.
pub const FMEA_PATH: &str = "./data/fmea.json";

/// ASOG compliance snapshot.
pub const ASOG_PATH: &str = "./data/asog.json";

// ============================================================================
// Output
// ============================================================================

/// Latest forecast document.
pub const FORECAST_PATH: &str = "./data/risk_forecast.json";

/// sled database holding every generated forecast.
pub const HISTORY_PATH: &str = "./data/forecast_history.db";

/// Forecasts older than this are pruned from history (days).
pub const HISTORY_RETENTION_DAYS: u32 = 90;

// ============================================================================
// Report
// ============================================================================

/// Failure modes listed in the combined report's top-risk table.
pub const TOP_RISKS: usize = 5;

/// Upper bound accepted for `report.top_risks`.
pub const TOP_RISKS_MAX: usize = 50;

/// Number of forecasts listed by `history` when no limit is given.
pub const HISTORY_LIST_LIMIT: usize = 10;
