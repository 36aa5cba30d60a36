//! Test builders — ergonomic constructors for raw audit records and the
//! processor that normalizes them.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use auditnorm::{event_from_record, AuditProcessor, Config, Event};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// AuditRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for raw audit records, wrapped as an [`Event`] the way the
/// feeds hand them to the pipeline.
///
/// # Example
///
/// ```rust
/// let event = AuditRecordBuilder::new(8)
///     .result_status("Succeeded")
///     .client_ip("203.0.113.5")
///     .build();
/// ```
pub struct AuditRecordBuilder {
    record: Map<String, Value>,
}

impl AuditRecordBuilder {
    pub fn new(record_type: impl Into<Value>) -> Self {
        let mut record = Map::new();
        record.insert("RecordType".to_string(), record_type.into());
        Self { record }
    }

    /// A record with no `RecordType` at all.
    pub fn untyped() -> Self {
        Self { record: Map::new() }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.record.insert(key.to_string(), value.into());
        self
    }

    pub fn result_status(self, status: &str) -> Self {
        self.field("ResultStatus", status)
    }

    pub fn client_ip(self, ip: &str) -> Self {
        self.field("ClientIP", ip)
    }

    pub fn user_id(self, id: &str) -> Self {
        self.field("UserId", id)
    }

    pub fn operation(self, operation: &str) -> Self {
        self.field("Operation", operation)
    }

    pub fn build(self) -> Event {
        event_from_record(self.record)
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// A processor with default (non-debug) configuration.
pub fn processor() -> AuditProcessor {
    AuditProcessor::new(&Config::default()).expect("default audit pipeline must build")
}

/// Normalize a built event with the default processor.
pub fn normalize(mut event: Event) -> Event {
    processor().process(&mut event);
    event
}

/// Parse a raw NDJSON record line and normalize it.
pub fn normalize_line(line: &str) -> Event {
    let event = auditnorm::feeds::parse_record(line).expect("fixture must be a JSON object");
    normalize(event)
}
