//! Workspace use-case service.
//!
//! # Responsibility
//! - Own history, notes and the active-note selection as explicit state.
//! - Load both entities from the gateway once at startup and write the
//!   affected key back after every committed mutation.
//! - Apply backup import/export with validate-then-mutate semantics.
//!
//! # Invariants
//! - Evaluation failures leave history untouched.
//! - A failed import leaves both stores and the persisted blobs untouched.
//! - The active selection always points at an existing note, or nowhere.

use crate::backup::{self, ImportError, Snapshot};
use crate::calc::evaluator::{evaluate, EvalError};
use crate::model::calculation::Calculation;
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::repo::gateway::{GatewayError, StorageGateway};
use crate::store::history_log::HistoryLog;
use crate::store::note_store::{NoteStore, NoteStoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Durable key holding the JSON-encoded note sequence.
pub const NOTES_STORAGE_KEY: &str = "kala_notes";
/// Durable key holding the JSON-encoded calculation sequence.
pub const HISTORY_STORAGE_KEY: &str = "kala_history";

/// Workspace use-case failure.
#[derive(Debug)]
pub enum WorkspaceError {
    /// Arithmetic input was rejected; display an error state, not a fault.
    Eval(EvalError),
    /// Durable read/write failed.
    Storage(GatewayError),
    /// Persisted blob under `key` is not decodable.
    CorruptState {
        key: &'static str,
        source: serde_json::Error,
    },
    /// State could not be encoded for persistence or export.
    Encode(serde_json::Error),
    /// Backup payload was rejected; existing state is untouched.
    Import(ImportError),
    /// Target note does not exist.
    NoteNotFound(NoteId),
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eval(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::CorruptState { key, source } => {
                write!(f, "persisted state under `{key}` is corrupt: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for WorkspaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Eval(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::CorruptState { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<EvalError> for WorkspaceError {
    fn from(value: EvalError) -> Self {
        Self::Eval(value)
    }
}

impl From<GatewayError> for WorkspaceError {
    fn from(value: GatewayError) -> Self {
        Self::Storage(value)
    }
}

impl From<ImportError> for WorkspaceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<NoteStoreError> for WorkspaceError {
    fn from(value: NoteStoreError) -> Self {
        match value {
            NoteStoreError::NotFound(id) => Self::NoteNotFound(id),
        }
    }
}

/// Per-section result of a backup import.
///
/// `None` means the section was absent from the payload and the existing
/// state was left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub notes_replaced: Option<usize>,
    pub history_replaced: Option<usize>,
}

/// In-flight summarization request, pinned to the note it was taken from.
///
/// Content is snapshotted at request time; the result is only applied when
/// the same note is still active (see [`WorkspaceService::resolve_summary`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest {
    note_id: NoteId,
    content: String,
}

impl SummaryRequest {
    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Single-actor workspace combining calculator history and notes.
#[derive(Debug)]
pub struct WorkspaceService<G: StorageGateway> {
    gateway: G,
    history: HistoryLog,
    notes: NoteStore,
    active_note_id: Option<NoteId>,
}

impl<G: StorageGateway> WorkspaceService<G> {
    /// Opens a workspace over the given gateway, loading both entities.
    ///
    /// Absent keys are treated as empty sequences.
    ///
    /// # Errors
    /// - [`WorkspaceError::Storage`] when a durable read fails.
    /// - [`WorkspaceError::CorruptState`] when a persisted blob does not
    ///   decode; existing data is left in place for manual recovery.
    pub fn open(gateway: G) -> Result<Self, WorkspaceError> {
        let notes = match gateway.get(NOTES_STORAGE_KEY)? {
            Some(raw) => decode_state(NOTES_STORAGE_KEY, &raw)?,
            None => Vec::new(),
        };
        let history = match gateway.get(HISTORY_STORAGE_KEY)? {
            Some(raw) => decode_state(HISTORY_STORAGE_KEY, &raw)?,
            None => Vec::new(),
        };

        info!(
            "event=workspace_open module=service status=ok notes={} history={}",
            notes.len(),
            history.len()
        );

        Ok(Self {
            gateway,
            history: HistoryLog::from_entries(history),
            notes: NoteStore::from_notes(notes),
            active_note_id: None,
        })
    }

    /// Evaluates an expression and records it on success.
    ///
    /// The raw, pre-sanitization expression text is what gets recorded.
    ///
    /// # Errors
    /// - [`WorkspaceError::Eval`] on rejected input; history is untouched
    ///   and the caller substitutes a visible error state.
    pub fn evaluate_and_record(&mut self, expression: &str) -> Result<Calculation, WorkspaceError> {
        let result = match evaluate(expression) {
            Ok(result) => result,
            Err(err) => {
                info!(
                    "event=evaluate module=service status=rejected reason={}",
                    err
                );
                return Err(err.into());
            }
        };

        let entry = self.history.record(expression, &result);
        self.persist_history()?;
        info!(
            "event=evaluate module=service status=ok id={} history_len={}",
            entry.id,
            self.history.len()
        );
        Ok(entry)
    }

    /// Saves a note draft; creating a note makes it the active selection.
    pub fn save_note(&mut self, draft: NoteDraft) -> Result<Note, WorkspaceError> {
        let created = draft.id.is_none();
        let note = self.notes.save(draft)?;
        if created {
            self.active_note_id = Some(note.id.clone());
        }
        self.persist_notes()?;
        info!(
            "event=note_save module=service status=ok id={} created={} notes={}",
            note.id,
            created,
            self.notes.len()
        );
        Ok(note)
    }

    /// Deletes a note if present; clears a matching active selection.
    ///
    /// Unknown ids are a no-op and trigger no durable write.
    pub fn delete_note(&mut self, id: &NoteId) -> Result<(), WorkspaceError> {
        if !self.notes.delete(id) {
            info!("event=note_delete module=service status=noop id={id}");
            return Ok(());
        }
        if self.active_note_id.as_ref() == Some(id) {
            self.active_note_id = None;
        }
        self.persist_notes()?;
        info!(
            "event=note_delete module=service status=ok id={id} notes={}",
            self.notes.len()
        );
        Ok(())
    }

    /// Selects the active note, or clears the selection with `None`.
    ///
    /// # Errors
    /// - [`WorkspaceError::NoteNotFound`] when the id matches no note.
    pub fn set_active_note(&mut self, id: Option<NoteId>) -> Result<(), WorkspaceError> {
        if let Some(id) = &id {
            if !self.notes.contains(id) {
                return Err(WorkspaceError::NoteNotFound(id.clone()));
            }
        }
        self.active_note_id = id;
        Ok(())
    }

    pub fn active_note_id(&self) -> Option<&NoteId> {
        self.active_note_id.as_ref()
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.active_note_id
            .as_ref()
            .and_then(|id| self.notes.get(id))
    }

    /// Read-only history view, newest-first.
    pub fn history(&self) -> &[Calculation] {
        self.history.list()
    }

    /// Read-only note list, newest created first.
    pub fn notes(&self) -> &[Note] {
        self.notes.list()
    }

    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Produces a snapshot of the current state without mutating it.
    pub fn export_snapshot(&self) -> Snapshot {
        backup::export(self.notes.list(), self.history.list())
    }

    /// Renders the current state as backup-file JSON.
    pub fn export_json(&self) -> Result<String, WorkspaceError> {
        backup::export_json(&self.export_snapshot()).map_err(WorkspaceError::Encode)
    }

    /// Restores state from a backup payload.
    ///
    /// Parsing and validation happen before any mutation; each section
    /// present in the payload replaces the matching state wholesale and is
    /// persisted, sections absent from the payload are left untouched.
    ///
    /// # Errors
    /// - [`WorkspaceError::Import`] on malformed or schema-violating input;
    ///   in-memory and persisted state are both unchanged.
    pub fn import_json(&mut self, raw: &str) -> Result<ImportOutcome, WorkspaceError> {
        let payload = backup::import(raw)?;

        let mut outcome = ImportOutcome::default();
        if let Some(notes) = payload.notes {
            outcome.notes_replaced = Some(notes.len());
            self.notes.replace_all(notes);
            if let Some(active) = &self.active_note_id {
                if !self.notes.contains(active) {
                    self.active_note_id = None;
                }
            }
            self.persist_notes()?;
        }
        if let Some(history) = payload.history {
            outcome.history_replaced = Some(history.len());
            self.history.replace_all(history);
            self.persist_history()?;
        }

        info!(
            "event=backup_import module=service status=ok notes_replaced={:?} history_replaced={:?}",
            outcome.notes_replaced, outcome.history_replaced
        );
        Ok(outcome)
    }

    /// Starts a summarization request for one note.
    ///
    /// Content is captured now; the eventual result must pass
    /// [`Self::resolve_summary`] before being shown.
    pub fn summary_request(&self, id: &NoteId) -> Result<SummaryRequest, WorkspaceError> {
        let note = self
            .notes
            .get(id)
            .ok_or_else(|| WorkspaceError::NoteNotFound(id.clone()))?;
        Ok(SummaryRequest {
            note_id: note.id.clone(),
            content: note.content.clone(),
        })
    }

    /// Whether a request still targets the active note.
    pub fn summary_applies(&self, request: &SummaryRequest) -> bool {
        self.active_note_id.as_ref() == Some(&request.note_id)
    }

    /// Accepts a summarization result, discarding it when the active note
    /// changed while the request was in flight.
    pub fn resolve_summary(&self, request: &SummaryRequest, summary: String) -> Option<String> {
        if self.summary_applies(request) {
            Some(summary)
        } else {
            warn!(
                "event=summary_discarded module=service status=stale note_id={}",
                request.note_id
            );
            None
        }
    }

    /// Releases the underlying gateway, e.g. to reopen the workspace.
    pub fn into_gateway(self) -> G {
        self.gateway
    }

    fn persist_notes(&mut self) -> Result<(), WorkspaceError> {
        let encoded = serde_json::to_string(self.notes.list()).map_err(WorkspaceError::Encode)?;
        self.gateway.set(NOTES_STORAGE_KEY, &encoded)?;
        Ok(())
    }

    fn persist_history(&mut self) -> Result<(), WorkspaceError> {
        let encoded = serde_json::to_string(self.history.list()).map_err(WorkspaceError::Encode)?;
        self.gateway.set(HISTORY_STORAGE_KEY, &encoded)?;
        Ok(())
    }
}

fn decode_state<T: serde::de::DeserializeOwned>(
    key: &'static str,
    raw: &str,
) -> Result<Vec<T>, WorkspaceError> {
    serde_json::from_str(raw).map_err(|source| WorkspaceError::CorruptState { key, source })
}
