//! Forecast JSON document

use std::path::Path;

use tracing::{debug, warn};

use super::StorageError;
use crate::types::{AbsenceReason, ForecastResult, Snapshot};

/// Write `result` to `path` as indented JSON.
///
/// Parent directories are created. The document is written to a sibling
/// temp file and renamed into place so readers never see a partial file.
pub fn save_forecast(result: &ForecastResult, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| StorageError::io(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(StorageError::io(path, e));
    }
    debug!(path = %path.display(), "Forecast document written");
    Ok(())
}

/// Read a previously saved forecast.
pub fn load_forecast(path: &Path) -> Snapshot<ForecastResult> {
    let json = match std::fs::read_to_string(path) {
        Ok(j) => j,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No forecast document found");
            return Snapshot::Absent(AbsenceReason::NotFound);
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Forecast document unreadable");
            return Snapshot::Absent(AbsenceReason::Unreadable(e.to_string()));
        }
    };
    match serde_json::from_str(&json) {
        Ok(result) => Snapshot::Loaded(result),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Corrupt forecast document, ignoring");
            Snapshot::Absent(AbsenceReason::Malformed(e.to_string()))
        }
    }
}
