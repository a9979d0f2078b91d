//! Tagged load outcome for input snapshots

use std::fmt;

/// Why a snapshot could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsenceReason {
    /// File does not exist yet
    NotFound,
    /// File exists but could not be read
    Unreadable(String),
    /// File was read but is not usable JSON for this snapshot
    Malformed(String),
}

impl fmt::Display for AbsenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsenceReason::NotFound => write!(f, "not found"),
            AbsenceReason::Unreadable(e) => write!(f, "unreadable: {e}"),
            AbsenceReason::Malformed(e) => write!(f, "malformed: {e}"),
        }
    }
}

/// Result of loading an input snapshot.
///
/// Loading never fails outright: a missing or broken file becomes `Absent`
/// with the reason kept, so callers can tell "no data yet" from
/// "load failed" without either being fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot<T> {
    Loaded(T),
    Absent(AbsenceReason),
}

impl<T> Snapshot<T> {
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Snapshot::Loaded(v) => Some(v),
            Snapshot::Absent(_) => None,
        }
    }

    /// Short status for logs and reports.
    pub fn describe(&self) -> String {
        match self {
            Snapshot::Loaded(_) => "loaded".to_string(),
            Snapshot::Absent(reason) => reason.to_string(),
        }
    }
}
