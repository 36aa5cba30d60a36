//! Keyed dispatch to one of several branches.
//!
//! A [`Conditional`] computes a dispatch key from the event and runs the
//! branch registered for it. Keys are typed: the audit pipeline dispatches on
//! a `Schema` enum rather than on raw strings. An event whose key is missing
//! or unregistered passes through untouched.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use super::Step;
use crate::event::Event;

type KeyFn<K> = Box<dyn Fn(&Event) -> Option<K> + Send + Sync>;

/// How a single event was routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<K> {
    /// The branch registered for this key ran.
    Branch(K),
    /// A key was computed but no branch is registered for it.
    Unmatched(K),
    /// The condition produced no key.
    NoKey,
}

pub struct Conditional<K> {
    condition: KeyFn<K>,
    branches: HashMap<K, Box<dyn Step>>,
}

impl<K> Conditional<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    pub fn new(condition: impl Fn(&Event) -> Option<K> + Send + Sync + 'static) -> Self {
        Self {
            condition: Box::new(condition),
            branches: HashMap::new(),
        }
    }

    /// Register `step` for `key`. A later registration for the same key
    /// replaces the earlier one.
    pub fn branch(mut self, key: K, step: impl Step + 'static) -> Self {
        self.branches.insert(key, Box::new(step));
        self
    }

    /// Route `event` and report which case applied.
    pub fn dispatch(&self, event: &mut Event) -> Dispatch<K> {
        let Some(key) = (self.condition)(event) else {
            return Dispatch::NoKey;
        };
        match self.branches.get(&key) {
            Some(step) => {
                step.apply(event);
                Dispatch::Branch(key)
            }
            None => Dispatch::Unmatched(key),
        }
    }
}

impl<K> Step for Conditional<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    fn apply(&self, event: &mut Event) {
        match self.dispatch(event) {
            Dispatch::Branch(key) => tracing::trace!(?key, "conditional: branch ran"),
            Dispatch::Unmatched(key) => tracing::trace!(?key, "conditional: no branch registered"),
            Dispatch::NoKey => tracing::trace!("conditional: no dispatch key"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
