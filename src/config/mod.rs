//! Forecast Configuration Module
//!
//! Per-vessel configuration loaded from TOML: input snapshot paths, output
//! locations and report options. The RPN risk bands are fixed and are not
//! part of the config.
//!
//! ## Loading Order
//!
//! 1. `NAUTILUS_CONFIG` environment variable (path to TOML file)
//! 2. `forecast_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded `ForecastConfig` is passed explicitly to whatever needs it;
//! there is no global instance.

mod forecast_config;
pub mod defaults;
pub mod validation;

pub use forecast_config::*;
