//! Error types for plugbridge-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from loading or validating the configuration.
///
/// Everything in here means "fix your configuration and re-run" — as opposed
/// to the environment/tool errors the pipeline crates report.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be written (used by `init` scaffolding).
    #[error("cannot write config at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error on load — includes file path and line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML serialization error (scaffold path).
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config declares a schema version this binary does not understand.
    #[error("unsupported config schema version {found} (this build understands up to {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// A required field is unset (missing, empty, or `"."`).
    #[error("required config field '{key}' is not set")]
    MissingField { key: &'static str },

    /// A required path is set but does not exist on disk.
    #[error("path for '{key}' does not exist: {path}")]
    PathMissing { key: &'static str, path: PathBuf },
}
