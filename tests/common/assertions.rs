//! Domain-specific assertion macros for auditnorm harnesses.
//!
//! These add context-rich failure messages that say *which* field of the
//! normalized event was wrong and dump the whole event on failure.

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that an event has a field at `path` with the expected value.
///
/// ```rust
/// assert_field!(event, "event.outcome", "success");
/// ```
#[macro_export]
macro_rules! assert_field {
    ($event:expr, $path:expr, $value:tt) => {{
        let event: &auditnorm::Event = &$event;
        let path: &str = $path;
        let expected = serde_json::json!($value);
        match event.get(path) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_field! failed:\n  event[{:?}]\n  expected: {}\n  actual:   {}\n  event: {}",
                path,
                expected,
                actual,
                event.to_pretty_json()
            ),
            None => panic!(
                "assert_field! failed: field {:?} not found.\n  event: {}",
                path,
                event.to_pretty_json()
            ),
        }
    }};
}

/// Assert that an event has no value at `path`.
#[macro_export]
macro_rules! assert_field_absent {
    ($event:expr, $path:expr) => {{
        let event: &auditnorm::Event = &$event;
        let path: &str = $path;
        if let Some(actual) = event.get(path) {
            panic!(
                "assert_field_absent! failed: {:?} = {}\n  event: {}",
                path,
                actual,
                event.to_pretty_json()
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Invariant helpers
// ---------------------------------------------------------------------------

/// Fields every normalized event carries regardless of record type.
pub fn assert_common_invariants(event: &auditnorm::Event) {
    assert_eq!(
        event.get_str("event.kind"),
        Some("event"),
        "every event must be marked event.kind=event: {}",
        event.to_pretty_json()
    );
    if let Some(outcome) = event.get_str("event.outcome") {
        assert!(
            ["success", "failure", "unknown"].contains(&outcome),
            "unexpected outcome {outcome:?}"
        );
    }
    if let Some(ip) = event.get_str("client.ip") {
        assert!(
            ip.parse::<std::net::IpAddr>().is_ok(),
            "client.ip must be a valid address, got {ip:?}"
        );
    }
}
