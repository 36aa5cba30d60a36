//! Delimiter-based splitting of a string field into named parts.
//!
//! A tokenizer such as `%{name}@%{domain}` is compiled once into an anchored
//! regex. Each key takes the shortest text up to the next literal delimiter;
//! the last key takes the rest of the input. `%{}` and `%{?skipped}` match
//! text without writing it.

use regex::Regex;

use super::{Condition, Step};
use crate::error::{Error, Result};
use crate::event::Event;

#[derive(Debug, Clone)]
pub struct Dissect {
    field: String,
    target_prefix: String,
    pattern: Regex,
    /// One entry per capture group; `None` for skipped keys.
    keys: Vec<Option<String>>,
    when: Option<Condition>,
    overwrite_keys: bool,
}

impl Dissect {
    pub fn new(tokenizer: &str, field: &str, target_prefix: &str) -> Result<Self> {
        let (pattern, keys) = compile(tokenizer)?;
        Ok(Self {
            field: field.to_string(),
            target_prefix: target_prefix.to_string(),
            pattern,
            keys,
            when: None,
            overwrite_keys: false,
        })
    }

    /// Only run when `condition` holds.
    pub fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    pub fn overwrite_keys(mut self, overwrite: bool) -> Self {
        self.overwrite_keys = overwrite;
        self
    }

    fn target(&self, key: &str) -> String {
        if self.target_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.target_prefix, key)
        }
    }

    /// Split `input` into `(target path, value)` pairs, or `None` when the
    /// tokenizer does not match.
    fn split(&self, input: &str) -> Option<Vec<(String, String)>> {
        let captures = self.pattern.captures(input)?;
        let parts = self
            .keys
            .iter()
            .enumerate()
            .filter_map(|(i, key)| {
                let key = key.as_ref()?;
                let value = captures.get(i + 1)?.as_str();
                Some((self.target(key), value.to_string()))
            })
            .collect();
        Some(parts)
    }
}

impl Step for Dissect {
    fn apply(&self, event: &mut Event) {
        if let Some(condition) = &self.when {
            if !condition.check(event) {
                return;
            }
        }
        let Some(input) = event.get_str(&self.field) else {
            return;
        };
        let Some(parts) = self.split(input) else {
            tracing::debug!(field = %self.field, "dissect: tokenizer did not match");
            return;
        };
        if !self.overwrite_keys {
            if let Some((path, _)) = parts.iter().find(|(path, _)| event.contains(path)) {
                tracing::debug!(%path, "dissect: target key already set");
                return;
            }
        }
        for (path, value) in parts {
            event.put(&path, value);
        }
    }
}

// ---------------------------------------------------------------------------
// Tokenizer compilation
// ---------------------------------------------------------------------------

fn compile(tokenizer: &str) -> Result<(Regex, Vec<Option<String>>)> {
    let invalid = |reason: &str| Error::InvalidTokenizer {
        tokenizer: tokenizer.to_string(),
        reason: reason.to_string(),
    };

    let reference = Regex::new(r"%\{([^}]*)\}")?;
    let mut pattern = String::from("(?s)^");
    let mut keys = Vec::new();
    let mut last_end = 0;
    let mut previous_was_key = false;

    for caps in reference.captures_iter(tokenizer) {
        let whole = caps.get(0).ok_or_else(|| invalid("unreadable key"))?;
        let literal = &tokenizer[last_end..whole.start()];
        if !literal.is_empty() {
            pattern.push_str(&regex::escape(literal));
        } else if previous_was_key {
            return Err(invalid("keys must be separated by a delimiter"));
        }

        let name = caps.get(1).map_or("", |m| m.as_str());
        if name.starts_with(['+', '&', '*']) || name.contains("->") {
            return Err(invalid("unsupported key modifier"));
        }
        let key = (!name.is_empty() && !name.starts_with('?')).then(|| name.to_string());
        keys.push(key);
        pattern.push_str("(.*?)");

        last_end = whole.end();
        previous_was_key = true;
    }

    if keys.is_empty() {
        return Err(invalid("no keys found"));
    }
    pattern.push_str(&regex::escape(&tokenizer[last_end..]));
    pattern.push('$');
    Ok((Regex::new(&pattern)?, keys))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
