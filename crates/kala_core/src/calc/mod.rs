//! Calculator logic.
//!
//! # Responsibility
//! - Parse and evaluate four-function arithmetic expressions.
//! - Keep failure modes explicit; evaluation never panics on user input.

pub mod evaluator;
