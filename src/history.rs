//! JSON persistence for commitment records.
//!
//! Files hold a JSON array of [`CommitmentRecord`]s. Reads are forgiving: an
//! absent, unreadable or malformed file is an empty collection. Writes replace
//! the whole file.

use crate::error::{FixtureError, Result};
use crate::types::CommitmentRecord;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load every record in `path`, or none if the file is missing or corrupt.
pub fn load_records(path: &Path) -> Vec<CommitmentRecord> {
    match try_load_records(path) {
        Ok(records) => records,
        Err(e) => {
            warn!("Treating {} as empty: {e}", path.display());
            Vec::new()
        }
    }
}

/// Load records without recovering from errors.
///
/// A missing file is still an empty collection.
///
/// # Errors
/// Returns [`FixtureError::Persistence`] if the file cannot be read or parsed.
pub fn try_load_records(path: &Path) -> Result<Vec<CommitmentRecord>> {
    if !path.exists() {
        debug!("No history at {}", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        FixtureError::persistence(format!("failed to read {}: {e}", path.display()))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        FixtureError::persistence(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Write `records` to `path` as a pretty-printed JSON array.
///
/// # Errors
/// Returns [`FixtureError::Persistence`] if serialization or the write fails.
pub fn save_records(path: &Path, records: &[CommitmentRecord]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut serializer)
        .map_err(|e| FixtureError::persistence(format!("failed to serialize records: {e}")))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            FixtureError::persistence(format!(
                "failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(path, buf).map_err(|e| {
        FixtureError::persistence(format!("failed to write {}: {e}", path.display()))
    })
}

/// Push `record` unless an identical one is already present.
///
/// Returns `true` if the record was appended.
pub fn append_unique(records: &mut Vec<CommitmentRecord>, record: CommitmentRecord) -> bool {
    if records.contains(&record) {
        return false;
    }
    records.push(record);
    true
}

/// Read-modify-write `record` into the history at `path`.
///
/// The file is rewritten even when the record was already present, so a
/// corrupt history is replaced by a valid one.
pub fn record_commitment(path: &Path, record: CommitmentRecord) -> Result<bool> {
    let mut records = load_records(path);
    let appended = append_unique(&mut records, record);
    save_records(path, &records)?;

    if appended {
        info!(
            "Appended commitment to {} ({} records)",
            path.display(),
            records.len()
        );
    } else {
        info!("Commitment already recorded in {}", path.display());
    }
    Ok(appended)
}
