//! Ordered composition of steps.
//!
//! [`PipelineBuilder`] collects named steps during the register phase and
//! [`PipelineBuilder::build`] freezes them into a [`Pipeline`] that is reused
//! for every event. With debug on, the builder brackets the pipeline with
//! begin/done trace steps and inserts a trace step after every named step.
//! Trace steps only log; they never touch the event.

use crate::event::Event;
use crate::steps::Step;

/// Log target for the debug trace steps.
pub const TRACE_TARGET: &str = "auditnorm::trace";

/// Logs `label` followed by the full event as pretty JSON.
#[derive(Debug, Clone)]
pub struct TraceStep {
    label: String,
}

impl TraceStep {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Step for TraceStep {
    fn apply(&self, event: &mut Event) {
        if tracing::enabled!(target: TRACE_TARGET, tracing::Level::DEBUG) {
            tracing::debug!(target: TRACE_TARGET, "{} :{}", self.label, event.to_pretty_json());
        }
    }
}

/// A frozen sequence of steps. Every step runs, in registration order.
pub struct Pipeline {
    name: String,
    steps: Vec<(String, Box<dyn Step>)>,
}

impl Pipeline {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the registered steps, trace steps included.
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn run(&self, event: &mut Event) {
        for (_, step) in &self.steps {
            step.apply(event);
        }
    }
}

impl Step for Pipeline {
    fn apply(&self, event: &mut Event) {
        self.run(event)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.step_names().collect::<Vec<_>>())
            .finish()
    }
}

pub struct PipelineBuilder {
    name: String,
    debug: bool,
    steps: Vec<(String, Box<dyn Step>)>,
}

impl PipelineBuilder {
    pub fn new(name: impl Into<String>, debug: bool) -> Self {
        let mut builder = Self {
            name: name.into(),
            debug,
            steps: Vec::new(),
        };
        if debug {
            let label = format!("{}: begin processing event", builder.name);
            builder.push_trace(label);
        }
        builder
    }

    /// Register `step` under `name`.
    pub fn add(mut self, name: &str, step: impl Step + 'static) -> Self {
        self.steps.push((name.to_string(), Box::new(step)));
        if self.debug {
            let label = format!("after {}/{}", self.name, name);
            self.push_trace(label);
        }
        self
    }

    pub fn build(mut self) -> Pipeline {
        if self.debug {
            let label = format!("{}: processing done", self.name);
            self.push_trace(label);
        }
        Pipeline {
            name: self.name,
            steps: self.steps,
        }
    }

    fn push_trace(&mut self, label: String) {
        self.steps
            .push(("trace".to_string(), Box::new(TraceStep::new(label))));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
