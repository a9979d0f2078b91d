//! nautilus-forecast - Nautilus One risk forecast CLI
//!
//! Generates a risk forecast from the vessel's FMEA and ASOG snapshots,
//! writes it as JSON and keeps a history of past forecasts.
//!
//! # Usage
//!
//! ```bash
//! # Generate with the configured paths and print the combined report
//! nautilus-forecast run
//!
//! # Override inputs, print JSON instead of text
//! nautilus-forecast run --fmea fmea.json --asog asog.json --format json
//!
//! # Inspect results
//! nautilus-forecast show
//! nautilus-forecast history --limit 20
//! nautilus-forecast check-config
//! ```
//!
//! # Environment Variables
//!
//! - `NAUTILUS_CONFIG`: Path to `forecast_config.toml` (when `--config` is not given)
//! - `RUST_LOG`: Logging level (default: info)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use nautilus_forecast::config::{defaults, validation, ForecastConfig};
use nautilus_forecast::report::{render_text, summary_line, CombinedReport};
use nautilus_forecast::storage::{load_forecast, ForecastHistory};
use nautilus_forecast::types::Snapshot;
use nautilus_forecast::RiskForecastEngine;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "nautilus-forecast")]
#[command(about = "Nautilus One vessel risk forecast")]
#[command(version)]
struct CliArgs {
    /// Path to forecast_config.toml (overrides NAUTILUS_CONFIG and ./forecast_config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a forecast, save it and print the combined report
    Run {
        /// FMEA snapshot (default: inputs.fmea_path)
        #[arg(long, value_name = "PATH")]
        fmea: Option<PathBuf>,
        /// ASOG snapshot (default: inputs.asog_path)
        #[arg(long, value_name = "PATH")]
        asog: Option<PathBuf>,
        /// Forecast output file (default: output.forecast_path)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Do not append this forecast to the history database
        #[arg(long)]
        no_history: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print a saved forecast
    Show {
        /// Forecast file (default: output.forecast_path)
        path: Option<PathBuf>,
    },

    /// List recent forecasts from the history database
    History {
        #[arg(long, default_value_t = defaults::HISTORY_LIST_LIMIT)]
        limit: usize,
    },

    /// Validate the configuration and print the effective values
    CheckConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Run {
            fmea,
            asog,
            output,
            no_history,
            format,
        } => {
            let mut config = load_config(args.config.as_deref())?;
            if let Some(p) = fmea {
                config.inputs.fmea_path = p;
            }
            if let Some(p) = asog {
                config.inputs.asog_path = p;
            }
            if let Some(p) = output {
                config.output.forecast_path = p;
            }
            if no_history {
                config.output.history_enabled = false;
            }
            run_forecast(&config, format)
        }
        Command::Show { path } => {
            let config = load_config(args.config.as_deref())?;
            show_forecast(path.as_deref().unwrap_or(&config.output.forecast_path))
        }
        Command::History { limit } => {
            let config = load_config(args.config.as_deref())?;
            list_history(&config.output.history_path, limit)
        }
        Command::CheckConfig => check_config(args.config.as_deref()),
    }
}

/// An explicit `--config` must load; otherwise fall back through the
/// standard search order.
fn load_config(explicit: Option<&Path>) -> Result<ForecastConfig> {
    match explicit {
        Some(path) => ForecastConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ForecastConfig::load()),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn run_forecast(config: &ForecastConfig, format: OutputFormat) -> Result<()> {
    let engine = RiskForecastEngine::from_config(config);

    let run = engine.run();
    let written = engine.persist(&run.result, &config.output.forecast_path);

    if config.output.history_enabled {
        // History failures are logged, never fatal.
        if let Err(e) = record_history(config, &run.result) {
            warn!(path = %config.output.history_path.display(), error = %e, "Forecast history not updated");
        }
    }

    let report = CombinedReport::from_run(&run, &config.vessel, config.report.top_risks);
    match format {
        OutputFormat::Text => println!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", report.to_json().context("Failed to serialize report")?),
    }

    written.with_context(|| {
        format!(
            "Forecast generated but could not be written to {}",
            config.output.forecast_path.display()
        )
    })
}

fn record_history(
    config: &ForecastConfig,
    result: &nautilus_forecast::ForecastResult,
) -> Result<()> {
    let history = ForecastHistory::open(&config.output.history_path)?;
    history.record(result)?;
    history.prune_older_than(config.output.history_retention_days)?;
    info!(entries = history.count(), "Forecast recorded in history");
    Ok(())
}

fn show_forecast(path: &Path) -> Result<()> {
    match load_forecast(path) {
        Snapshot::Loaded(result) => {
            let json = serde_json::to_string_pretty(&result).context("Failed to serialize forecast")?;
            println!("{json}");
        }
        Snapshot::Absent(reason) => {
            eprintln!("No forecast at {} ({reason})", path.display());
        }
    }
    Ok(())
}

fn list_history(path: &Path, limit: usize) -> Result<()> {
    if !path.exists() {
        eprintln!("No forecast history at {}", path.display());
        return Ok(());
    }
    let history = ForecastHistory::open(path)
        .with_context(|| format!("Failed to open forecast history at {}", path.display()))?;
    let recent = history.recent(limit);
    if recent.is_empty() {
        eprintln!("Forecast history is empty");
        return Ok(());
    }
    for result in &recent {
        println!("{}", summary_line(result));
    }
    println!("({} of {} forecast(s))", recent.len(), history.count());
    Ok(())
}

fn check_config(explicit: Option<&Path>) -> Result<()> {
    let source = explicit.map(Path::to_path_buf).or_else(ForecastConfig::find);

    let config = match source {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            for w in validation::validate_unknown_keys(&raw) {
                println!("warning: {w}");
            }
            let config = ForecastConfig::load_from_file(&path)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            println!("Config {} is valid", path.display());
            config
        }
        None => {
            println!("No config file found, using built-in defaults");
            ForecastConfig::default()
        }
    };

    for w in validation::review_values(&config) {
        println!("warning: {w}");
    }
    println!();
    print!("{}", config.to_toml().context("Failed to serialize config")?);
    Ok(())
}
