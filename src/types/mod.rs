//! Shared data structures for the Nautilus One risk forecast
//!
//! - FailureRecord: one FMEA failure mode with its RPN factors
//! - ComplianceSnapshot: ASOG parameters and the overall compliance flag
//! - Snapshot: tagged load outcome (`Loaded` vs `Absent`)
//! - ForecastResult: the persisted output of one forecast run

mod compliance;
mod failure;
mod forecast;
mod snapshot;
// Public so the fixed RPN bands stay addressable as `types::thresholds`.
pub mod thresholds;

pub use compliance::*;
pub use failure::*;
pub use forecast::*;
pub use snapshot::*;
