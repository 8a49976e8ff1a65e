//! Error types for plugbridge-build.

use std::path::PathBuf;

use thiserror::Error;

use plugbridge_core::ConfigError;

/// All errors that can arise from the build pipeline.
///
/// `Config` means "fix your configuration"; everything else is an
/// environment or tool problem. No variant is retried — every failure is
/// terminal and requires operator intervention.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A configuration problem surfaced while resolving paths or identity.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The source tree to package does not exist.
    #[error("source directory does not exist: {path}")]
    SourceMissing { path: PathBuf },

    /// The dependency-resolution tool could not be invoked at all.
    #[error("cannot invoke dependency resolver '{tool}': {source}")]
    ResolverUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The dependency-resolution tool ran and reported failure.
    #[error("dependency resolver '{tool}' exited with status {code}: {stderr}")]
    ResolverFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    /// The archive could not be written.
    #[error("failed to write archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory walk failed partway.
    #[error("tree walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Convenience constructor for [`BuildError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> BuildError {
    BuildError::Io {
        path: path.into(),
        source,
    }
}
