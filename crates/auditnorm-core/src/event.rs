//! The mutable event tree every step reads from and writes to.
//!
//! An [`Event`] is a JSON object addressed with dot-delimited paths
//! (`"event.outcome"`, `"o365audit.ClientIP"`). Reads never fail: a missing
//! segment, a non-object intermediate, or an explicit JSON `null` all read as
//! absent. Writes create intermediate objects as needed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record flowing through the pipeline, owned by a single `process` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `path`. Returns `None` for missing fields and for `null`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }

    /// Look up `path` and return it only when it holds a string.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Write `value` at `path`, replacing whatever was there. Intermediate
    /// segments that are missing or hold a non-object are replaced with
    /// empty objects. Returns the previous value, if any.
    pub fn put(&mut self, path: &str, value: impl Into<Value>) -> Option<Value> {
        let value = value.into();
        match path.rsplit_once('.') {
            None => self.fields.insert(path.to_string(), value),
            Some((parent, leaf)) => {
                let mut current = &mut self.fields;
                for segment in parent.split('.') {
                    let slot = current
                        .entry(segment.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if !slot.is_object() {
                        *slot = Value::Object(Map::new());
                    }
                    current = match slot {
                        Value::Object(map) => map,
                        _ => unreachable!("slot was just replaced with an object"),
                    };
                }
                current.insert(leaf.to_string(), value)
            }
        }
    }

    /// Remove `path` and return the value it held. Parent objects are kept
    /// even when they become empty.
    pub fn delete(&mut self, path: &str) -> Option<Value> {
        match path.rsplit_once('.') {
            None => self.fields.remove(path),
            Some((parent, leaf)) => {
                let mut current = &mut self.fields;
                for segment in parent.split('.') {
                    current = current.get_mut(segment)?.as_object_mut()?;
                }
                current.remove(leaf)
            }
        }
    }

    /// Append `value` to the sequence at `path`.
    ///
    /// An absent field becomes a one-element array and an existing scalar is
    /// promoted to an array. A value already present in the sequence is not
    /// appended again.
    pub fn append_to(&mut self, path: &str, value: impl Into<Value>) {
        let value = value.into();
        let merged = match self.delete(path) {
            None | Some(Value::Null) => vec![value],
            Some(Value::Array(mut items)) => {
                if !items.contains(&value) {
                    items.push(value);
                }
                items
            }
            Some(existing) if existing == value => vec![existing],
            Some(existing) => vec![existing, value],
        };
        self.put(path, Value::Array(merged));
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Pretty JSON rendering used by the debug trace steps.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.fields).unwrap_or_else(|err| format!("<{err}>"))
    }
}

impl From<Map<String, Value>> for Event {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for Event {
    type Error = Value;

    /// Only JSON objects can become events; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
