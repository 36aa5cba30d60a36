//! Construction-time errors for auditnorm-core.
//!
//! Nothing in here is raised while an event is being processed: steps absorb
//! their own failures. These errors only surface while loading configuration
//! or building a pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A dissect tokenizer could not be compiled.
    #[error("invalid dissect tokenizer {tokenizer:?}: {reason}")]
    InvalidTokenizer { tokenizer: String, reason: String },

    #[error("tokenizer regex: {0}")]
    Regex(#[from] regex::Error),

    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
