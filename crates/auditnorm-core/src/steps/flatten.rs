//! Array-to-map flattening of name/value property arrays.
//!
//! Audit records carry semi-structured arrays such as
//! `[{"Name": "UserAgent", "Value": "..."}, ...]`. These steps turn them
//! into maps keyed by the sanitized `Name`. A name seen more than once keeps
//! every value, in input order, as a sequence.
//!
//! Per key the merge runs a small state machine: unseen → [`Slot::Single`]
//! on the first entry, [`Slot::Single`] → [`Slot::Multi`] on the second, and
//! [`Slot::Multi`] appends from then on.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::Step;
use crate::event::Event;

/// Replace spaces and dots, which cannot appear in a path segment.
pub fn sanitize_key(name: &str) -> String {
    name.replace([' ', '.'], "_")
}

#[derive(Debug, Clone, PartialEq)]
enum Slot<T> {
    Single(T),
    Multi(Vec<T>),
}

impl<T> Slot<T> {
    fn push(self, value: T) -> Self {
        match self {
            Slot::Single(first) => Slot::Multi(vec![first, value]),
            Slot::Multi(mut values) => {
                values.push(value);
                Slot::Multi(values)
            }
        }
    }
}

/// Per-key slots for one flatten run, kept in key order.
#[derive(Debug)]
struct Merged<T> {
    slots: BTreeMap<String, Slot<T>>,
}

impl<T> Merged<T> {
    fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    fn insert(&mut self, key: String, value: T) {
        let next = match self.slots.remove(&key) {
            None => Slot::Single(value),
            Some(slot) => slot.push(value),
        };
        self.slots.insert(key, next);
    }
}

/// Read a field of a raw array entry, treating `null` as absent.
fn entry_field<'a>(entry: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    entry.get(name).filter(|v| !v.is_null())
}

/// The entry's sanitized name, or `None` when it is missing or not a string.
fn entry_name(entry: &Map<String, Value>) -> Option<String> {
    entry_field(entry, "Name")
        .and_then(Value::as_str)
        .map(sanitize_key)
}

// ---------------------------------------------------------------------------
// Name/Value arrays
// ---------------------------------------------------------------------------

/// Flattens `[{Name, Value}, ...]` at `from` into `{Name: Value}` at `to`.
///
/// A missing or non-array `from` writes nothing. Otherwise the map is always
/// written, even when every entry was skipped.
#[derive(Debug, Clone)]
pub struct KvArrayToMap {
    from: String,
    to: String,
}

impl KvArrayToMap {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn flatten(entries: &[Value]) -> Map<String, Value> {
        let mut merged = Merged::new();
        for entry in entries {
            let Some(entry) = entry.as_object() else {
                tracing::trace!("flatten: skipping non-object entry");
                continue;
            };
            let (Some(name), Some(value)) = (entry_name(entry), entry_field(entry, "Value")) else {
                tracing::trace!("flatten: skipping entry without Name/Value");
                continue;
            };
            merged.insert(name, value.clone());
        }
        merged
            .slots
            .into_iter()
            .map(|(key, slot)| {
                let value = match slot {
                    Slot::Single(v) => v,
                    Slot::Multi(vs) => Value::Array(vs),
                };
                (key, value)
            })
            .collect()
    }
}

impl Step for KvArrayToMap {
    fn apply(&self, event: &mut Event) {
        let Some(Value::Array(entries)) = event.get(&self.from) else {
            return;
        };
        let map = Self::flatten(entries);
        event.put(&self.to, Value::Object(map));
    }
}

// ---------------------------------------------------------------------------
// Name/NewValue/OldValue arrays
// ---------------------------------------------------------------------------

/// Flattens `[{Name, NewValue, OldValue}, ...]` at `from` into
/// `{Name: {NewValue, OldValue}}` at `to`.
///
/// On a repeated name both `NewValue` and `OldValue` become sequences,
/// index-aligned. An entry is skipped only when `Name`, `NewValue` or
/// `OldValue` is missing or `null`; empty strings, `false` and `0` are
/// ordinary values.
#[derive(Debug, Clone)]
pub struct ModifiedPropertiesToMap {
    from: String,
    to: String,
}

impl ModifiedPropertiesToMap {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn flatten(entries: &[Value]) -> Map<String, Value> {
        let mut merged = Merged::new();
        for entry in entries {
            let Some(entry) = entry.as_object() else {
                tracing::trace!("flatten: skipping non-object entry");
                continue;
            };
            let (Some(name), Some(new_value), Some(old_value)) = (
                entry_name(entry),
                entry_field(entry, "NewValue"),
                entry_field(entry, "OldValue"),
            ) else {
                tracing::trace!("flatten: skipping entry without Name/NewValue/OldValue");
                continue;
            };
            merged.insert(name, (new_value.clone(), old_value.clone()));
        }
        merged
            .slots
            .into_iter()
            .map(|(key, slot)| {
                let (new_value, old_value) = match slot {
                    Slot::Single((new, old)) => (new, old),
                    Slot::Multi(pairs) => {
                        let (news, olds): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
                        (Value::Array(news), Value::Array(olds))
                    }
                };
                let mut change = Map::new();
                change.insert("NewValue".to_string(), new_value);
                change.insert("OldValue".to_string(), old_value);
                (key, Value::Object(change))
            })
            .collect()
    }
}

impl Step for ModifiedPropertiesToMap {
    fn apply(&self, event: &mut Event) {
        let Some(Value::Array(entries)) = event.get(&self.from) else {
            return;
        };
        let map = Self::flatten(entries);
        event.put(&self.to, Value::Object(map));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
