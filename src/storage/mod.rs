//! Forecast persistence
//!
//! - `forecast_file`: the latest forecast as a pretty-printed JSON document
//! - `history`: every generated forecast in a sled tree, keyed by time

mod forecast_file;
pub mod history;

pub use forecast_file::{load_forecast, save_forecast};
pub use history::ForecastHistory;

use std::path::PathBuf;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sled::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
