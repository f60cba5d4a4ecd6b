//! Core domain logic for the Kala workspace.
//! This crate is the single source of truth for business invariants:
//! expression evaluation, the bounded calculation history, note CRUD,
//! backup snapshots and the durable key-value gateway behind them.

pub mod ai;
pub mod backup;
pub mod calc;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use ai::{Assistant, ProviderFailure, SummaryProvider};
pub use backup::{ImportError, Snapshot, SnapshotPayload};
pub use calc::evaluator::{evaluate, EvalError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::calculation::{Calculation, CalculationId};
pub use model::note::{Note, NoteDraft, NoteId, UNTITLED_NOTE_TITLE};
pub use repo::gateway::{
    GatewayError, MemoryStorageGateway, SqliteStorageGateway, StorageGateway,
};
pub use service::workspace::{
    ImportOutcome, SummaryRequest, WorkspaceError, WorkspaceService, HISTORY_STORAGE_KEY,
    NOTES_STORAGE_KEY,
};
pub use store::history_log::{HistoryLog, HISTORY_CAPACITY};
pub use store::note_store::{NoteStore, NoteStoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
