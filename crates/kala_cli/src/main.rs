//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `kala_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use kala_core::{MemoryStorageGateway, NoteDraft, WorkspaceService};

fn main() {
    println!("kala_core version={}", kala_core::core_version());

    // A tiny in-memory session exercising the evaluate/save paths without
    // touching any on-disk state.
    let mut workspace = WorkspaceService::open(MemoryStorageGateway::new())
        .expect("in-memory workspace should open");
    let calc = workspace
        .evaluate_and_record("(2 + 3) * 4")
        .expect("probe expression should evaluate");
    println!("evaluate {} => {}", calc.expression, calc.result);

    let note = workspace
        .save_note(NoteDraft::create("probe", "smoke test"))
        .expect("probe note should save");
    println!("notes={} active={}", workspace.notes().len(), note.id);
}
