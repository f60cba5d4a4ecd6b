//! Keyed note collection.
//!
//! # Responsibility
//! - Own the note list and its create/update/delete operations.
//! - Keep insertion order (newest created first) for default listing.
//!
//! # Invariants
//! - An id identifies at most one note at any time.
//! - Updates preserve the note's id and list position.
//! - Deleting an absent id is a no-op, not an error.

use crate::model::note::{normalize_title, Note, NoteDraft, NoteId};
use chrono::Utc;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Note store failure for save operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteStoreError {
    /// Draft carried an id with no matching note.
    NotFound(NoteId),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for NoteStoreError {}

/// Owned collection of notes, newest created first.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted notes, keeping their order.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Saves a draft: creates a note when no id is present, otherwise
    /// updates the matching note in place and refreshes `updated_at`.
    ///
    /// # Errors
    /// - [`NoteStoreError::NotFound`] when the draft id matches no note.
    pub fn save(&mut self, draft: NoteDraft) -> Result<Note, NoteStoreError> {
        match draft.id {
            Some(id) => {
                let note = self
                    .notes
                    .iter_mut()
                    .find(|note| note.id == id)
                    .ok_or(NoteStoreError::NotFound(id))?;
                if let Some(title) = draft.title {
                    note.title = normalize_title(Some(title));
                }
                if let Some(content) = draft.content {
                    note.content = content;
                }
                note.updated_at = Utc::now().timestamp_millis();
                Ok(note.clone())
            }
            None => {
                let note = Note::new(draft.title, draft.content);
                self.notes.insert(0, note.clone());
                Ok(note)
            }
        }
    }

    /// Removes the note with the given id; reports whether one existed.
    pub fn delete(&mut self, id: &NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| &note.id != id);
        self.notes.len() != before
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Read-only view in insertion order, newest created first.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    /// Replaces the whole collection, used by backup restore.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, NoteStoreError};
    use crate::model::note::{NoteDraft, NoteId, UNTITLED_NOTE_TITLE};

    #[test]
    fn create_prepends_and_defaults_blank_title() {
        let mut store = NoteStore::new();
        store.save(NoteDraft::create("First", "a")).unwrap();
        let second = store.save(NoteDraft::create("", "b")).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].id, second.id);
        assert_eq!(store.list()[0].title, UNTITLED_NOTE_TITLE);
    }

    #[test]
    fn update_preserves_id_and_position() {
        let mut store = NoteStore::new();
        let older = store.save(NoteDraft::create("Older", "x")).unwrap();
        store.save(NoteDraft::create("Newer", "y")).unwrap();

        let updated = store
            .save(NoteDraft::update(older.id.clone(), "Older", "z"))
            .unwrap();

        assert_eq!(updated.id, older.id);
        assert_eq!(store.list()[1].id, older.id);
        assert_eq!(store.list()[1].content, "z");
        assert!(updated.updated_at >= older.updated_at);
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut store = NoteStore::new();
        let missing = NoteId::from("missing");
        let err = store
            .save(NoteDraft::update(missing.clone(), "t", "c"))
            .unwrap_err();
        assert_eq!(err, NoteStoreError::NotFound(missing));
    }

    #[test]
    fn delete_is_noop_for_unknown_id() {
        let mut store = NoteStore::new();
        store.save(NoteDraft::create("Keep", "k")).unwrap();

        assert!(!store.delete(&NoteId::from("missing")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_removes_matching_note() {
        let mut store = NoteStore::new();
        let note = store.save(NoteDraft::create("Gone", "g")).unwrap();

        assert!(store.delete(&note.id));
        assert!(store.is_empty());
        assert!(!store.contains(&note.id));
    }
}
