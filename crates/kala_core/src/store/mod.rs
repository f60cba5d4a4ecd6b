//! Owned in-memory workspace state.
//!
//! # Responsibility
//! - Hold the calculation history and note collection as explicit owned
//!   state, mutated only through their defined operations.
//! - Keep presentation layers read-only subscribers of `list()` views.
//!
//! # Invariants
//! - History is newest-first and bounded at [`history_log::HISTORY_CAPACITY`].
//! - Note ids are unique within a store and never reused.

pub mod history_log;
pub mod note_store;
