//! Domain model for the Kala workspace.
//!
//! # Responsibility
//! - Define the canonical records exchanged between stores, backup and UI.
//! - Keep wire-compatible serde shapes for the backup/persistence format.
//!
//! # Invariants
//! - Every record is identified by a stable, never-reused string id.
//! - Timestamps are Unix epoch milliseconds.

pub mod calculation;
pub mod note;
