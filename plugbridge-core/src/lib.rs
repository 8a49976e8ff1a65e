//! # plugbridge-core
//!
//! Validated configuration record and path resolution for plugbridge.
//!
//! The configuration lives in a single `plugbridge.toml` next to the plugin
//! source checkout. [`config::load_at`] parses it, migrates legacy shapes to
//! the current schema, and rejects anything it cannot type-check. Relative
//! paths are resolved against the config file's directory by
//! [`paths::PathResolver`].

pub mod config;
pub mod error;
pub mod paths;

pub use config::{Config, ConfigPaths, PackageIdentity, SCHEMA_VERSION};
pub use error::ConfigError;
pub use paths::PathResolver;

/// File name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "plugbridge.toml";

/// Vendored-dependency subdirectory inside the build workspace, and an
/// excluded directory inside the installed tree.
pub const VENDOR_DIR_NAME: &str = "libs";

/// Sentinel file the host-side installer drops into the installed tree once
/// registry dependencies are materialized. Never a sync candidate.
pub const DEPS_INSTALLED_MARKER: &str = "deps_installed";
