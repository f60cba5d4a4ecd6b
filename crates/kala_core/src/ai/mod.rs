//! Summarization collaborator boundary.
//!
//! # Responsibility
//! - Define the opaque text-transform service the workspace delegates to.
//! - Enforce the degraded-mode contract: empty input short-circuits and
//!   upstream failure yields a fixed message, never an error to the caller.

use log::warn;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Message shown when summarization is requested for an empty note.
pub const EMPTY_NOTE_MESSAGE: &str = "The note is empty.";
/// Message substituted when the summarization upstream fails.
pub const SUMMARY_FAILURE_MESSAGE: &str = "Error summarizing notes.";
/// Message substituted when the explanation upstream fails.
pub const EXPLAIN_FAILURE_MESSAGE: &str = "Could not generate an explanation at this time.";

/// Upstream failure reported by a provider implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    /// Stable machine-readable code, e.g. `upstream_unavailable`.
    pub code: String,
    /// Human-readable detail, logged but never shown to the user.
    pub message: String,
}

impl ProviderFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl Display for ProviderFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "provider failure [{}]: {}", self.code, self.message)
    }
}

impl Error for ProviderFailure {}

/// External text-transform service.
///
/// Implementations live outside this crate (the real one performs a
/// network call); the core only depends on this contract.
pub trait SummaryProvider {
    /// Summarizes free-form note content.
    fn summarize(&self, content: &str) -> Result<String, ProviderFailure>;
    /// Explains one calculation in plain terms.
    fn explain(&self, expression: &str, result: &str) -> Result<String, ProviderFailure>;
}

/// Facade applying the fixed fallback messages around a provider.
pub struct Assistant<P: SummaryProvider> {
    provider: P,
}

impl<P: SummaryProvider> Assistant<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Summarizes note content; always returns displayable text.
    pub fn summarize_note(&self, content: &str) -> String {
        if content.trim().is_empty() {
            return EMPTY_NOTE_MESSAGE.to_string();
        }
        match self.provider.summarize(content) {
            Ok(summary) => summary,
            Err(failure) => {
                warn!(
                    "event=summarize module=ai status=degraded code={}",
                    failure.code
                );
                SUMMARY_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// Explains one calculation; always returns displayable text.
    pub fn explain_calculation(&self, expression: &str, result: &str) -> String {
        match self.provider.explain(expression, result) {
            Ok(explanation) => explanation,
            Err(failure) => {
                warn!(
                    "event=explain module=ai status=degraded code={}",
                    failure.code
                );
                EXPLAIN_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Assistant, ProviderFailure, SummaryProvider, EMPTY_NOTE_MESSAGE, EXPLAIN_FAILURE_MESSAGE,
        SUMMARY_FAILURE_MESSAGE,
    };

    struct FixedProvider {
        healthy: bool,
    }

    impl SummaryProvider for FixedProvider {
        fn summarize(&self, content: &str) -> Result<String, ProviderFailure> {
            if self.healthy {
                Ok(format!("summary of {} chars", content.len()))
            } else {
                Err(ProviderFailure::new("upstream_unavailable", "timeout"))
            }
        }

        fn explain(&self, expression: &str, result: &str) -> Result<String, ProviderFailure> {
            if self.healthy {
                Ok(format!("{expression} equals {result}"))
            } else {
                Err(ProviderFailure::new("upstream_unavailable", "timeout"))
            }
        }
    }

    #[test]
    fn empty_content_short_circuits_before_provider() {
        let assistant = Assistant::new(FixedProvider { healthy: false });
        assert_eq!(assistant.summarize_note("   \n"), EMPTY_NOTE_MESSAGE);
    }

    #[test]
    fn provider_failure_degrades_to_fixed_messages() {
        let assistant = Assistant::new(FixedProvider { healthy: false });
        assert_eq!(assistant.summarize_note("budget notes"), SUMMARY_FAILURE_MESSAGE);
        assert_eq!(
            assistant.explain_calculation("2 + 2", "4"),
            EXPLAIN_FAILURE_MESSAGE
        );
    }

    #[test]
    fn healthy_provider_output_passes_through() {
        let assistant = Assistant::new(FixedProvider { healthy: true });
        assert_eq!(assistant.summarize_note("12345"), "summary of 5 chars");
        assert_eq!(assistant.explain_calculation("2 + 2", "4"), "2 + 2 equals 4");
    }
}
