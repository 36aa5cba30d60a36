//! Configuration for the audit pipeline.
//!
//! [`Config::load`] layers the embedded defaults, an optional TOML file, and
//! `AUDITNORM_*` environment variables. [`Config::defaults`] returns the
//! embedded defaults without touching the filesystem or the environment
//! (useful in tests).

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
# Log the full event after every pipeline step (target auditnorm::trace).
debug = false
"#;

const ENV_PREFIX: &str = "AUDITNORM";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Pipeline configuration. `debug` is the only option the pipeline reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Load the layered configuration.
    ///
    /// When `path` is given the file must exist; otherwise only the defaults
    /// and the environment are consulted.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
