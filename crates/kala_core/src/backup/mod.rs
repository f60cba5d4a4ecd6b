//! Backup snapshot codec.
//!
//! # Responsibility
//! - Serialize the combined workspace state into the self-describing
//!   snapshot format and parse it back, validating structure on import.
//! - Keep the wire format byte-compatible with backups produced by the
//!   reference app (`notes`/`history` arrays plus an `exportDate` stamp).
//!
//! # Invariants
//! - Export never mutates its inputs.
//! - Import returns either a fully validated payload or an error; callers
//!   can always keep their existing state on failure.
//! - Sections absent from the payload are reported absent, not defaulted.

use crate::model::calculation::Calculation;
use crate::model::note::Note;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Fixed prefix of exported backup file names.
pub const BACKUP_FILE_PREFIX: &str = "kala_backup_";

/// Point-in-time export of notes and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    pub history: Vec<Calculation>,
    /// RFC 3339 timestamp taken when the snapshot was produced.
    #[serde(rename = "exportDate")]
    pub export_date: String,
}

/// Sections recovered from an imported snapshot.
///
/// A section missing from the payload stays `None`; the caller leaves the
/// corresponding state untouched in that case.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SnapshotPayload {
    pub notes: Option<Vec<Note>>,
    pub history: Option<Vec<Calculation>>,
}

/// Import failure for malformed or schema-violating backup payloads.
#[derive(Debug)]
pub enum ImportError {
    /// Input is not well-formed JSON.
    Malformed(serde_json::Error),
    /// Input is JSON but violates the snapshot element shapes.
    SchemaMismatch(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "backup payload is not valid JSON: {err}"),
            Self::SchemaMismatch(details) => {
                write!(f, "backup payload does not match snapshot schema: {details}")
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::SchemaMismatch(_) => None,
        }
    }
}

/// Produces a snapshot of the given state, stamped now.
pub fn export(notes: &[Note], history: &[Calculation]) -> Snapshot {
    Snapshot {
        notes: notes.to_vec(),
        history: history.to_vec(),
        export_date: Utc::now().to_rfc3339(),
    }
}

/// Renders a snapshot as the pretty-printed JSON written to backup files.
pub fn export_json(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// Parses and validates a backup payload.
///
/// # Errors
/// - [`ImportError::Malformed`] when `raw` is not JSON.
/// - [`ImportError::SchemaMismatch`] when `notes`/`history` elements do not
///   satisfy the Note/Calculation shapes, or carry blank/duplicate ids.
pub fn import(raw: &str) -> Result<SnapshotPayload, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(ImportError::Malformed)?;
    let payload: SnapshotPayload = serde_json::from_value(value)
        .map_err(|err| ImportError::SchemaMismatch(err.to_string()))?;

    if let Some(notes) = payload.notes.as_deref() {
        validate_ids("notes", notes.iter().map(|note| note.id.as_ref()))?;
    }
    if let Some(history) = payload.history.as_deref() {
        validate_ids("history", history.iter().map(|entry| entry.id.as_ref()))?;
    }

    Ok(payload)
}

/// Backup file name for the given calendar date.
///
/// The reference app appended the locale-formatted current date; the fixed
/// prefix is the load-bearing part for users sorting their backups.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{BACKUP_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

fn validate_ids<'a>(
    section: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ImportError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(ImportError::SchemaMismatch(format!(
                "blank id in `{section}`"
            )));
        }
        if !seen.insert(id) {
            return Err(ImportError::SchemaMismatch(format!(
                "duplicate id `{id}` in `{section}`"
            )));
        }
    }
    Ok(())
}
