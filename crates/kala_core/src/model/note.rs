//! Note domain model.
//!
//! # Responsibility
//! - Define the title/content document managed by the note store.
//! - Provide the partial-draft shape used by the save use-case.
//!
//! # Invariants
//! - `id` identifies at most one note in a store at any time and is never
//!   reused after deletion.
//! - `updated_at` is refreshed on every save.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Placeholder applied when a note is saved with a blank title.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";

/// Stable identifier of one note.
///
/// Serialized as an opaque string; new ids are UUID v4, imported ids are
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Generates a fresh, never-reused id.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NoteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One title/content document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable note id, assigned on first save.
    pub id: NoteId,
    /// Display title; defaults to [`UNTITLED_NOTE_TITLE`] when blank.
    pub title: String,
    /// Free-form text body.
    pub content: String,
    /// Last-modified instant, epoch milliseconds.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Note {
    /// Creates a note from draft fields, applying title/content defaults.
    pub fn new(title: Option<String>, content: Option<String>) -> Self {
        Self {
            id: NoteId::new_random(),
            title: normalize_title(title),
            content: content.unwrap_or_default(),
            updated_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Partial note shape accepted by the save use-case.
///
/// A draft without an `id` creates a new note; a draft with an `id`
/// updates the matching note in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<NoteId>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteDraft {
    /// Draft creating a new note.
    pub fn create(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }

    /// Draft updating an existing note.
    pub fn update(id: NoteId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

pub(crate) fn normalize_title(title: Option<String>) -> String {
    match title {
        Some(value) if !value.trim().is_empty() => value,
        _ => UNTITLED_NOTE_TITLE.to_string(),
    }
}
