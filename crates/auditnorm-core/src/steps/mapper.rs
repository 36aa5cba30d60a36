//! Table-driven translation of one field into another.
//!
//! [`Mapper`] reads a key from `from`, optionally case-folds it, looks it up
//! in its [`Mappings`], and writes the result to `to`. Keys that are not in
//! the table resolve through an explicit [`MapperDefault`]. Every
//! classification lookup of the audit pipeline is an instance of this one
//! step with a different table.

use serde_json::{Number, Value};
use std::collections::HashMap;

use super::Step;
use crate::event::Event;

/// Lookup table backing a [`Mapper`].
#[derive(Debug, Clone)]
pub enum Mappings {
    /// Compile-time table from [`crate::tables`].
    Static(&'static phf::Map<&'static str, &'static str>),
    Owned(HashMap<String, Value>),
}

impl Mappings {
    fn get(&self, key: &str) -> Option<Value> {
        match self {
            Mappings::Static(table) => table.get(key).map(|v| Value::from(*v)),
            Mappings::Owned(table) => table.get(key).cloned(),
        }
    }
}

impl From<&'static phf::Map<&'static str, &'static str>> for Mappings {
    fn from(table: &'static phf::Map<&'static str, &'static str>) -> Self {
        Mappings::Static(table)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mappings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Mappings::Owned(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// What a [`Mapper`] writes when the key is not in its table.
#[derive(Debug, Clone, Default)]
pub enum MapperDefault {
    /// Write nothing.
    #[default]
    Nothing,
    /// Write this literal, including when the source field is absent and
    /// `skip_missing` is off.
    Value(Value),
    /// Derive the output from the (possibly case-folded) key. Not consulted
    /// when the source field is absent.
    With(fn(&Value) -> Option<Value>),
}

#[derive(Debug, Clone)]
pub struct Mapper {
    from: String,
    to: String,
    mappings: Mappings,
    default: MapperDefault,
    lowercase: bool,
    skip_missing: bool,
}

impl Mapper {
    pub fn new(from: &str, to: &str, mappings: impl Into<Mappings>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            mappings: mappings.into(),
            default: MapperDefault::Nothing,
            lowercase: false,
            skip_missing: false,
        }
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = MapperDefault::Value(value.into());
        self
    }

    pub fn default_with(mut self, derive: fn(&Value) -> Option<Value>) -> Self {
        self.default = MapperDefault::With(derive);
        self
    }

    /// Case-fold string keys before the lookup.
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Do nothing when the source field is absent instead of falling back
    /// to the default.
    pub fn skip_missing(mut self, skip: bool) -> Self {
        self.skip_missing = skip;
        self
    }

    fn resolve(&self, key: Option<&Value>) -> Option<Value> {
        let Some(key) = key else {
            return match &self.default {
                MapperDefault::Value(value) => Some(value.clone()),
                MapperDefault::Nothing | MapperDefault::With(_) => None,
            };
        };
        let folded;
        let key = match key {
            Value::String(s) if self.lowercase => {
                folded = Value::String(s.to_lowercase());
                &folded
            }
            _ => key,
        };
        if let Some(mapped) = lookup_key(key).and_then(|k| self.mappings.get(&k)) {
            return Some(mapped);
        }
        match &self.default {
            MapperDefault::Nothing => None,
            MapperDefault::Value(value) => Some(value.clone()),
            MapperDefault::With(derive) => derive(key),
        }
    }
}

/// Table keys are strings; numbers and booleans match their textual form.
fn lookup_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_key(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Textual form of a numeric key. Integral floats (`15.0`) read as integers.
pub(crate) fn number_key(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                return (f as i64).to_string();
            }
        }
    }
    n.to_string()
}

impl Step for Mapper {
    fn apply(&self, event: &mut Event) {
        let key = event.get(&self.from);
        if key.is_none() && self.skip_missing {
            return;
        }
        match self.resolve(key) {
            Some(Value::Null) | None => {}
            Some(value) => {
                event.put(&self.to, value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
