//! Effect error types
//!
//! Nothing here crosses the effect's own boundary: the driver logs these and
//! falls back to default painting or the previous settings snapshot.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or compiling corner settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid window pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
