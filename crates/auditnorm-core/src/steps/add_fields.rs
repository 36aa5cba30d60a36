//! Unconditional literal field writes.

use serde_json::Value;

use super::Step;
use crate::event::Event;

/// Writes a fixed set of values under `target` on every run.
///
/// An empty target writes the fields at the root of the event.
#[derive(Debug, Clone)]
pub struct AddFields {
    target: String,
    fields: Vec<(String, Value)>,
}

impl AddFields {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.push((key.to_string(), value.into()));
        self
    }

    fn path(&self, key: &str) -> String {
        if self.target.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.target, key)
        }
    }
}

impl Step for AddFields {
    fn apply(&self, event: &mut Event) {
        for (key, value) in &self.fields {
            event.put(&self.path(key), value.clone());
        }
    }
}
