//! Step primitives — the reusable building blocks of every pipeline.
//!
//! A [`Step`] consumes an [`Event`] and mutates it in place. Steps never
//! fail: missing inputs, coercion failures, and malformed nested entries are
//! absorbed at the smallest granularity (one rule, one array entry) and at
//! most logged.
//!
//! | Step | Purpose |
//! |------|---------|
//! | [`Convert`] | copy/rename fields, optionally coercing their type |
//! | [`AddFields`] | write literal values under a prefix |
//! | [`Dissect`] | split a string field by a `%{key}` tokenizer |
//! | [`Mapper`] | translate a field through a lookup table |
//! | [`KvArrayToMap`], [`ModifiedPropertiesToMap`] | flatten name/value arrays |
//! | [`Conditional`] | run one of several branches keyed by the event |
//!
//! Plain closures `Fn(&mut Event)` are steps too, which is how the one-off
//! cleanup and derivation steps of the audit pipeline are written.

use crate::event::Event;

pub mod add_fields;
pub mod condition;
pub mod conditional;
pub mod convert;
pub mod dissect;
pub mod flatten;
pub mod mapper;

pub use add_fields::AddFields;
pub use condition::Condition;
pub use conditional::{Conditional, Dispatch};
pub use convert::{Convert, ConvertError, ConvertType, Mode};
pub use dissect::Dissect;
pub use flatten::{sanitize_key, KvArrayToMap, ModifiedPropertiesToMap};
pub use mapper::{Mapper, MapperDefault, Mappings};

/// A single transformation applied to an event.
///
/// Steps are built once and then shared read-only by every event, so they
/// must be `Send + Sync` and must not keep per-event state.
pub trait Step: Send + Sync {
    fn apply(&self, event: &mut Event);
}

impl<F> Step for F
where
    F: Fn(&mut Event) + Send + Sync,
{
    fn apply(&self, event: &mut Event) {
        self(event)
    }
}
