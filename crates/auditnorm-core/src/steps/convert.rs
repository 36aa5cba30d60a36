//! Field copy/rename with optional type coercion.
//!
//! Each [`Rule`] reads `from`, optionally coerces the value to a
//! [`ConvertType`], and writes it to `to`. Rules are independent: with
//! `fail_on_error` off (the setting every audit pipeline uses), a failing
//! rule is logged and skipped while the others still apply.

use serde_json::{Number, Value};
use std::net::IpAddr;
use thiserror::Error;

use super::Step;
use crate::event::Event;

/// Target representation for a converted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertType {
    /// Validated IP address, kept in its original textual form.
    Ip,
    String,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    Float,
    Double,
    Boolean,
}

/// Whether the source field survives the conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Copy,
    Rename,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("field [{0}] is missing")]
    Missing(String),

    #[error("unable to convert value [{value}] of field [{field}] to {to:?}")]
    Unsupported {
        field: String,
        value: Value,
        to: ConvertType,
    },

    #[error("value [{value}] of field [{field}] is not a valid IP address")]
    InvalidIp { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub from: String,
    pub to: String,
    pub kind: Option<ConvertType>,
}

/// The convert step. Build with [`Convert::new`] and the chained setters.
#[derive(Debug, Clone)]
pub struct Convert {
    rules: Vec<Rule>,
    mode: Mode,
    ignore_missing: bool,
    fail_on_error: bool,
}

impl Convert {
    /// An empty convert step that ignores missing fields and never fails,
    /// the configuration used throughout the audit pipelines.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: Mode::Copy,
            ignore_missing: true,
            fail_on_error: false,
        }
    }

    pub fn field(mut self, from: &str, to: &str) -> Self {
        self.rules.push(Rule {
            from: from.to_string(),
            to: to.to_string(),
            kind: None,
        });
        self
    }

    pub fn typed(mut self, from: &str, to: &str, kind: ConvertType) -> Self {
        self.rules.push(Rule {
            from: from.to_string(),
            to: to.to_string(),
            kind: Some(kind),
        });
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn ignore_missing(mut self, ignore: bool) -> Self {
        self.ignore_missing = ignore;
        self
    }

    /// When set, the first failing rule undoes every change this step made
    /// and records the failure in `error.message`.
    pub fn fail_on_error(mut self, fail: bool) -> Self {
        self.fail_on_error = fail;
        self
    }

    fn apply_rule(&self, rule: &Rule, event: &mut Event) -> Result<(), ConvertError> {
        let Some(value) = event.get(&rule.from) else {
            if self.ignore_missing {
                return Ok(());
            }
            return Err(ConvertError::Missing(rule.from.clone()));
        };
        let converted = match rule.kind {
            None => value.clone(),
            Some(kind) => coerce(&rule.from, value, kind)?,
        };
        if self.mode == Mode::Rename {
            event.delete(&rule.from);
        }
        event.put(&rule.to, converted);
        Ok(())
    }
}

impl Default for Convert {
    fn default() -> Self {
        Self::new()
    }
}

impl Step for Convert {
    fn apply(&self, event: &mut Event) {
        let backup = self.fail_on_error.then(|| event.clone());
        for rule in &self.rules {
            let Err(err) = self.apply_rule(rule, event) else {
                continue;
            };
            match &backup {
                Some(original) => {
                    tracing::debug!(error = %err, "convert failed, restoring event");
                    *event = original.clone();
                    event.append_to("error.message", err.to_string());
                    return;
                }
                None => tracing::debug!(error = %err, "convert skipped field"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

fn coerce(field: &str, value: &Value, kind: ConvertType) -> Result<Value, ConvertError> {
    let unsupported = || ConvertError::Unsupported {
        field: field.to_string(),
        value: value.clone(),
        to: kind,
    };
    match kind {
        ConvertType::Ip => {
            let text = value.as_str().ok_or_else(unsupported)?;
            match text.parse::<IpAddr>() {
                Ok(_) => Ok(Value::String(text.to_string())),
                Err(_) => Err(ConvertError::InvalidIp {
                    field: field.to_string(),
                    value: text.to_string(),
                }),
            }
        }
        ConvertType::String => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err(unsupported()),
        },
        ConvertType::Long => to_i64(value).map(Value::from).ok_or_else(unsupported),
        ConvertType::Integer => to_i64(value)
            .and_then(|n| i32::try_from(n).ok())
            .map(Value::from)
            .ok_or_else(unsupported),
        ConvertType::Float | ConvertType::Double => to_f64(value)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(unsupported),
        ConvertType::Boolean => to_bool(value).map(Value::Bool).ok_or_else(unsupported),
    }
}

fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn event(value: Value) -> Event {
        Event::try_from(value).unwrap()
    }

    #[test]
    fn copies_present_fields_and_skips_missing() {
        let step = Convert::new()
            .field("o365audit.Id", "event.id")
            .field("o365audit.UserId", "user.id");
        let mut evt = event(json!({"o365audit": {"Id": "abc"}}));
        step.apply(&mut evt);
        assert_eq!(evt.get("event.id"), Some(&json!("abc")));
        assert_eq!(evt.get("user.id"), None);
        assert_eq!(evt.get("o365audit.Id"), Some(&json!("abc")));
    }

    #[test]
    fn all_fields_missing_leaves_event_unchanged() {
        let step = Convert::new()
            .field("o365audit.Id", "event.id")
            .typed("client.address", "client.ip", ConvertType::Ip);
        let original = event(json!({"unrelated": 1}));
        let mut evt = original.clone();
        step.apply(&mut evt);
        assert_eq!(evt, original);
    }

    #[test]
    fn invalid_ip_skips_only_that_rule() {
        let step = Convert::new()
            .typed("client.address", "client.ip", ConvertType::Ip)
            .typed("server.address", "server.ip", ConvertType::Ip);
        let mut evt = event(json!({
            "client": {"address": "not-an-ip"},
            "server": {"address": "2001:db8::1"}
        }));
        step.apply(&mut evt);
        assert_eq!(evt.get("client.ip"), None);
        assert_eq!(evt.get("server.ip"), Some(&json!("2001:db8::1")));
    }

    #[test]
    fn rename_removes_source() {
        let step = Convert::new().field("a.b", "c").mode(Mode::Rename);
        let mut evt = event(json!({"a": {"b": 1}}));
        step.apply(&mut evt);
        assert_eq!(evt.get("c"), Some(&json!(1)));
        assert_eq!(evt.get("a.b"), None);
    }

    #[test]
    fn fail_on_error_restores_event() {
        let step = Convert::new()
            .field("a", "copied")
            .typed("b", "b_ip", ConvertType::Ip)
            .fail_on_error(true);
        let mut evt = event(json!({"a": 1, "b": "bogus"}));
        step.apply(&mut evt);
        assert_eq!(evt.get("copied"), None);
        assert_eq!(
            evt.get("error.message"),
            Some(&json!(["value [bogus] of field [b] is not a valid IP address"]))
        );
    }

    #[test]
    fn missing_field_is_an_error_when_not_ignored() {
        let step = Convert::new()
            .field("absent", "x")
            .ignore_missing(false)
            .fail_on_error(true);
        let mut evt = Event::new();
        step.apply(&mut evt);
        assert_eq!(evt.get("error.message"), Some(&json!(["field [absent] is missing"])));
    }

    #[rstest]
    #[case(json!("42"), ConvertType::Long, Some(json!(42)))]
    #[case(json!(7.9), ConvertType::Long, Some(json!(7)))]
    #[case(json!("4294967296"), ConvertType::Integer, None)]
    #[case(json!("-12"), ConvertType::Integer, Some(json!(-12)))]
    #[case(json!("1.5"), ConvertType::Double, Some(json!(1.5)))]
    #[case(json!(3), ConvertType::String, Some(json!("3")))]
    #[case(json!({"x": 1}), ConvertType::String, None)]
    #[case(json!("True"), ConvertType::Boolean, Some(json!(true)))]
    #[case(json!("f"), ConvertType::Boolean, Some(json!(false)))]
    #[case(json!("yes"), ConvertType::Boolean, None)]
    #[case(json!("192.0.2.1"), ConvertType::Ip, Some(json!("192.0.2.1")))]
    #[case(json!(17), ConvertType::Ip, None)]
    fn coercions(#[case] input: Value, #[case] kind: ConvertType, #[case] expected: Option<Value>) {
        assert_eq!(coerce("f", &input, kind).ok(), expected);
    }
}
