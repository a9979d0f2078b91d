//! Forecast History Storage
//!
//! Keeps every generated ForecastResult in a sled tree so trends can be read
//! back across runs. Keys are the generation time in milliseconds as
//! big-endian bytes, which gives chronological iteration order for free.

use std::path::Path;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use super::StorageError;
use crate::types::ForecastResult;

/// sled-backed forecast history
#[derive(Clone)]
pub struct ForecastHistory {
    db: sled::Db,
}

impl ForecastHistory {
    /// Open or create the history database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), entries = db.len(), "Forecast history opened");
        Ok(Self { db })
    }

    /// Append a forecast. A forecast generated in the same millisecond as an
    /// existing entry replaces it.
    pub fn record(&self, result: &ForecastResult) -> Result<(), StorageError> {
        let key = history_key(result.generated_at.timestamp_millis());
        let value = serde_json::to_vec(result)?;
        self.db.insert(key, value)?;
        self.db.flush()?;
        Ok(())
    }

    /// Most recent `limit` forecasts, newest first. Undecodable entries are
    /// skipped.
    pub fn recent(&self, limit: usize) -> Vec<ForecastResult> {
        self.db
            .iter()
            .rev()
            .filter_map(Result::ok)
            .filter_map(|(_, value)| serde_json::from_slice::<ForecastResult>(&value).ok())
            .take(limit)
            .collect()
    }

    /// Newest forecast, if any.
    pub fn latest(&self) -> Option<ForecastResult> {
        self.recent(1).into_iter().next()
    }

    pub fn count(&self) -> usize {
        self.db.len()
    }

    /// Delete forecasts older than `days` days. Returns how many were removed.
    ///
    /// A window reaching past the representable date range prunes nothing.
    pub fn prune_older_than(&self, days: u32) -> Result<usize, StorageError> {
        let Some(cutoff) = Duration::try_days(i64::from(days))
            .and_then(|window| Utc::now().checked_sub_signed(window))
        else {
            debug!(days, "Retention window exceeds date range, nothing to prune");
            return Ok(0);
        };
        let cutoff = cutoff.timestamp_millis();
        let stale: Vec<sled::IVec> = self
            .db
            .range(..history_key(cutoff))
            .keys()
            .filter_map(Result::ok)
            .collect();
        for key in &stale {
            self.db.remove(key)?;
        }
        if !stale.is_empty() {
            self.db.flush()?;
            info!(removed = stale.len(), days, "Pruned old forecasts from history");
        }
        Ok(stale.len())
    }
}

// Pre-1970 timestamps clamp to zero; forecasts are always stamped with now.
fn history_key(millis: i64) -> [u8; 8] {
    u64::try_from(millis).unwrap_or(0).to_be_bytes()
}
