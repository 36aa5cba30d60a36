//! auditnorm — audit record normalization.
//!
//! Re-exports the core pipeline and the record feeds so that integration
//! tests and benches can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! Feed (file / stdin) ──► channel ──► AuditProcessor ──► NDJSON on stdout
//! ```
//!
//! Feeds run on tokio tasks; the pipeline itself is synchronous and runs
//! each event to completion before the next is taken off the channel.

pub use auditnorm_core::*;
pub use auditnorm_feeds as feeds;
