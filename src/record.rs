//! Raw grade records as handed over by the portal, and typed field lookup.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Candidate keys for the subject name, in priority order.
pub const SUBJECT_FIELDS: &[&str] = &["subjectDesc", "subject"];

/// Candidate keys for the grade's display value, in priority order.
pub const VALUE_FIELDS: &[&str] = &["displayValue", "display_value", "decimalValue"];

/// Subject used when none of [`SUBJECT_FIELDS`] resolves.
pub const UNKNOWN_SUBJECT: &str = "Unknown";

/// One grade entry from the portal: an untyped string-keyed mapping.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawGradeRecord {
    fields: Map<String, Value>,
}

impl RawGradeRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Builds a record from string pairs. Mostly handy in tests.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self { fields }
    }

    /// Returns the first candidate key holding a scalar, rendered as text.
    ///
    /// Missing keys, `null` and non-scalar values are skipped. A string is
    /// returned as-is, even when empty, so the first present key wins.
    pub fn resolve(&self, candidates: &[&str]) -> Option<String> {
        candidates
            .iter()
            .find_map(|key| self.fields.get(*key).and_then(scalar_text))
    }

    pub fn subject(&self) -> String {
        self.resolve(SUBJECT_FIELDS)
            .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string())
    }

    /// Display value of the grade; an absent value unifies with the empty string.
    pub fn display_value(&self) -> String {
        self.resolve(VALUE_FIELDS).unwrap_or_default()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
