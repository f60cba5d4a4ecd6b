//! Persistence boundary of the workspace.
//!
//! # Responsibility
//! - Define the string-keyed durable store contract the services depend on.
//! - Isolate SQLite details from state and orchestration code.

pub mod gateway;
