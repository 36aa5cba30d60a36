//! Guard conditions evaluated against an event before a step runs.

use serde_json::Value;

use crate::event::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The field is a string containing `substring`, or an array with at
    /// least one such string.
    Contains { field: String, substring: String },
}

impl Condition {
    pub fn contains(field: &str, substring: &str) -> Self {
        Condition::Contains {
            field: field.to_string(),
            substring: substring.to_string(),
        }
    }

    pub fn check(&self, event: &Event) -> bool {
        match self {
            Condition::Contains { field, substring } => match event.get(field) {
                Some(Value::String(s)) => s.contains(substring.as_str()),
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|s| s.contains(substring.as_str())),
                _ => false,
            },
        }
    }
}
