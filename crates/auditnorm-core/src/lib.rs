//! auditnorm-core — audit log normalization core library.
//!
//! Raw audit records are mutated in place into a common event schema by an
//! ordered pipeline of small, failure-tolerant steps.
//!
//! # Architecture
//!
//! ```text
//! Event ◄── Steps (Convert, AddFields, Dissect, Mapper, Flatten)
//!             │
//!             ├──► Conditional ──► per-schema Pipelines
//!             ▼
//!        PipelineBuilder ──► Pipeline ──► AuditProcessor
//! ```
//!
//! Pipelines and lookup tables are built once and only read afterwards, so a
//! single [`AuditProcessor`] can be shared by any number of threads. Each
//! event is owned by exactly one `process` call.

pub mod audit;
pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod steps;
pub mod tables;

pub use audit::{event_from_record, AuditProcessor, Schema};
pub use config::Config;
pub use error::{Error, Result};
pub use event::Event;
pub use pipeline::{Pipeline, PipelineBuilder, TraceStep};
pub use steps::Step;
