//! Forecast Configuration - paths, history and report options as TOML values
//!
//! Each struct implements `Default` with the values in `defaults.rs`, so an
//! empty or missing file behaves exactly like the built-in configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one vessel deployment.
///
/// Load with `ForecastConfig::load()` which searches:
/// 1. `$NAUTILUS_CONFIG` env var
/// 2. `./forecast_config.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Vessel identification
    #[serde(default)]
    pub vessel: VesselInfo,

    /// Input snapshot locations
    #[serde(default)]
    pub inputs: InputConfig,

    /// Forecast document and history locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Combined report options
    #[serde(default)]
    pub report: ReportConfig,
}

impl ForecastConfig {
    /// Load configuration using the standard search order:
    /// 1. `$NAUTILUS_CONFIG` environment variable
    /// 2. `./forecast_config.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that fails to load is logged and skipped, never fatal.
    pub fn load() -> Self {
        let from_env = std::env::var(defaults::CONFIG_ENV_VAR).ok();
        Self::load_from_sources(from_env.as_deref(), Path::new(defaults::LOCAL_CONFIG_FILE))
    }

    /// Search order of `load()` with the sources passed in.
    pub fn load_from_sources(env_path: Option<&str>, local: &Path) -> Self {
        // 1. Env var
        if let Some(path) = env_path.filter(|p| !p.is_empty()) {
            let p = PathBuf::from(path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), vessel = %config.vessel.name, "Loaded forecast config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Local file
        if local.exists() {
            match Self::load_from_file(local) {
                Ok(config) => {
                    info!(path = %local.display(), vessel = %config.vessel.name, "Loaded forecast config");
                    return config;
                }
                Err(e) => {
                    warn!(path = %local.display(), error = %e, "Failed to load config, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No forecast config found — using built-in defaults");
        Self::default()
    }

    /// The config file `load()` would try first, if any exists.
    pub fn find() -> Option<PathBuf> {
        let from_env = std::env::var(defaults::CONFIG_ENV_VAR).ok();
        Self::find_in_sources(from_env.as_deref(), Path::new(defaults::LOCAL_CONFIG_FILE))
    }

    /// Search order of `find()` with the sources passed in.
    pub fn find_in_sources(env_path: Option<&str>, local: &Path) -> Option<PathBuf> {
        env_path
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .or_else(|| local.exists().then(|| local.to_path_buf()))
    }

    /// Load from a specific TOML file path.
    ///
    /// Unknown keys are logged as warnings (with a suggestion when one is
    /// close); parse and validation failures are errors.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        for w in super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        for w in super::validation::review_values(&config) {
            warn!("{}", w);
        }
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Forecast config saved");
        Ok(())
    }

    /// Validate field values.
    ///
    /// Rules:
    /// - All paths must be non-empty
    /// - `report.top_risks` must be within 1..=TOP_RISKS_MAX
    /// - `output.history_retention_days` must be > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        Self::check_path(&self.inputs.fmea_path, "inputs.fmea_path", &mut errors);
        Self::check_path(&self.inputs.asog_path, "inputs.asog_path", &mut errors);
        Self::check_path(&self.output.forecast_path, "output.forecast_path", &mut errors);
        Self::check_path(&self.output.history_path, "output.history_path", &mut errors);

        if self.report.top_risks == 0 || self.report.top_risks > defaults::TOP_RISKS_MAX {
            errors.push(format!(
                "report.top_risks: must be within 1-{} (got {})",
                defaults::TOP_RISKS_MAX,
                self.report.top_risks
            ));
        }

        if self.output.history_retention_days == 0 {
            errors.push("output.history_retention_days: must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_path(path: &Path, name: &str, errors: &mut Vec<String>) {
        if path.as_os_str().is_empty() {
            errors.push(format!("{name}: path must not be empty"));
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {1}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Config parse error ({}): {1}", .0.display())]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Config serialization error: {0}")]
    Serialize(#[source] toml::ser::Error),
    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Vessel Info
// ============================================================================

/// Identification metadata. Not used for logic; appears in logs and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselInfo {
    /// Vessel name
    #[serde(default = "default_vessel_name")]
    pub name: String,

    /// IMO number
    #[serde(default)]
    pub imo: String,

    /// Operating company
    #[serde(default)]
    pub operator: String,
}

fn default_vessel_name() -> String {
    "NAUTILUS-ONE".to_string()
}

impl Default for VesselInfo {
    fn default() -> Self {
        Self {
            name: default_vessel_name(),
            imo: String::new(),
            operator: String::new(),
        }
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Where the FMEA and ASOG snapshots are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_fmea_path")]
    pub fmea_path: PathBuf,

    #[serde(default = "default_asog_path")]
    pub asog_path: PathBuf,
}

fn default_fmea_path() -> PathBuf { PathBuf::from(defaults::FMEA_PATH) }
fn default_asog_path() -> PathBuf { PathBuf::from(defaults::ASOG_PATH) }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            fmea_path: default_fmea_path(),
            asog_path: default_asog_path(),
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Where forecasts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Latest forecast JSON document
    #[serde(default = "default_forecast_path")]
    pub forecast_path: PathBuf,

    /// sled history database directory
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Whether each run is appended to the history database
    #[serde(default = "default_history_enabled")]
    pub history_enabled: bool,

    /// History entries older than this are pruned after each run (days)
    #[serde(default = "default_retention_days")]
    pub history_retention_days: u32,
}

fn default_forecast_path() -> PathBuf { PathBuf::from(defaults::FORECAST_PATH) }
fn default_history_path() -> PathBuf { PathBuf::from(defaults::HISTORY_PATH) }
fn default_history_enabled() -> bool { true }
fn default_retention_days() -> u32 { defaults::HISTORY_RETENTION_DAYS }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            forecast_path: default_forecast_path(),
            history_path: default_history_path(),
            history_enabled: default_history_enabled(),
            history_retention_days: default_retention_days(),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

/// Combined report options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Failure modes listed in the top-risk table
    #[serde(default = "default_top_risks")]
    pub top_risks: usize,
}

fn default_top_risks() -> usize { defaults::TOP_RISKS }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_risks: default_top_risks(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
