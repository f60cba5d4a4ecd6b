//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate evaluator, stores, backup codec and gateway into
//!   use-case level APIs.
//! - Keep UI layers decoupled from state ownership and storage details.

pub mod workspace;
