//! Calculation history record.
//!
//! # Responsibility
//! - Define the immutable (expression, result) record kept by the history
//!   log and the backup snapshot.
//!
//! # Invariants
//! - A `Calculation` is never mutated after creation; it only leaves the
//!   log through capacity eviction or wholesale replacement on restore.
//! - `expression` holds the raw user input, before sanitization.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one history entry.
///
/// Serialized as an opaque string. New ids are UUID v4, but imported
/// backups may carry other formats (the reference app used epoch strings),
/// so the inner value is not re-parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationId(String);

impl CalculationId {
    /// Generates a fresh, never-reused id.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Display for CalculationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CalculationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CalculationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CalculationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One evaluated expression with its stringified numeric result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    /// Stable entry id, assigned at creation time.
    pub id: CalculationId,
    /// Raw input as submitted for evaluation.
    pub expression: String,
    /// Canonical string form of the numeric result.
    pub result: String,
    /// Creation instant, epoch milliseconds.
    pub timestamp: i64,
}

impl Calculation {
    /// Creates a record for one successful evaluation, stamped now.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            id: CalculationId::new_random(),
            expression: expression.into(),
            result: result.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Calculation, CalculationId};

    #[test]
    fn new_assigns_distinct_ids() {
        let a = Calculation::new("1+1", "2");
        let b = Calculation::new("1+1", "2");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_with_reference_field_names() {
        let calc = Calculation {
            id: CalculationId::from("1700000000000"),
            expression: "2 + 2".to_string(),
            result: "4".to_string(),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&calc).expect("calculation should serialize");
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["expression"], "2 + 2");
        assert_eq!(json["result"], "4");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }
}
