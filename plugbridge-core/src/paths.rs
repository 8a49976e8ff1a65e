//! Path resolution against a validated configuration record.
//!
//! Relative paths in `plugbridge.toml` are interpreted relative to the
//! directory containing the config file, never the process working
//! directory. Each accessor states its own requiredness and existence
//! policy; nothing here silently returns a bad path.

use std::path::{Path, PathBuf};

use crate::config::{Config, PackageIdentity};
use crate::error::ConfigError;

/// Default dependency manifest file name under the source root.
pub const DEFAULT_MANIFEST_FILE: &str = "requirements.txt";

/// Resolves configured paths for one pipeline invocation.
pub struct PathResolver<'a> {
    config: &'a Config,
    base_dir: &'a Path,
}

impl<'a> PathResolver<'a> {
    /// `base_dir` is the directory containing the loaded config file.
    pub fn new(config: &'a Config, base_dir: &'a Path) -> Self {
        Self { config, base_dir }
    }

    /// The editable source tree. Required; must exist.
    pub fn source_root(&self) -> Result<PathBuf, ConfigError> {
        self.resolve("paths.source_root", &self.config.paths.source_root, true)
    }

    /// The installed copy inside the host application. Required; may not
    /// exist yet — the first sync creates it file by file.
    pub fn installed_root(&self) -> Result<PathBuf, ConfigError> {
        self.resolve(
            "paths.installed_root",
            &self.config.paths.installed_root,
            false,
        )
    }

    /// The distribution directory. Required; created by the build if absent.
    pub fn dist_dir(&self) -> Result<PathBuf, ConfigError> {
        self.resolve("paths.dist_dir", &self.config.paths.dist_dir, false)
    }

    /// The dependency manifest. Optional; defaults to
    /// `<source_root>/requirements.txt`. An explicitly configured manifest
    /// must exist; the default one may be absent (empty manifest).
    pub fn manifest(&self) -> Result<PathBuf, ConfigError> {
        match &self.config.paths.manifest {
            Some(_) => self.resolve("paths.manifest", &self.config.paths.manifest, true),
            None => Ok(self.source_root()?.join(DEFAULT_MANIFEST_FILE)),
        }
    }

    /// The local host-application installation. Required by `launch`; must
    /// exist.
    pub fn host_root(&self) -> Result<PathBuf, ConfigError> {
        self.resolve("paths.host_root", &self.config.paths.host_root, true)
    }

    /// The host executable, relative to [`Self::host_root`]. Required by
    /// `launch`; must exist.
    pub fn host_executable(&self) -> Result<PathBuf, ConfigError> {
        let raw = self
            .config
            .paths
            .host_executable
            .as_deref()
            .filter(|s| is_set(s))
            .ok_or(ConfigError::MissingField {
                key: "paths.host_executable",
            })?;
        let path = self.host_root()?.join(raw);
        if !path.exists() {
            return Err(ConfigError::PathMissing {
                key: "paths.host_executable",
                path,
            });
        }
        Ok(path)
    }

    /// Package identity for workspace and archive naming. Required by `build`.
    pub fn package(&self) -> Result<&'a PackageIdentity, ConfigError> {
        self.config
            .package
            .as_ref()
            .ok_or(ConfigError::MissingField { key: "package.name" })
    }

    fn resolve(
        &self,
        key: &'static str,
        raw: &Option<String>,
        must_exist: bool,
    ) -> Result<PathBuf, ConfigError> {
        let raw = raw
            .as_deref()
            .filter(|s| is_set(s))
            .ok_or(ConfigError::MissingField { key })?;
        let path = if Path::new(raw).is_absolute() {
            PathBuf::from(raw)
        } else {
            self.base_dir.join(raw)
        };
        if must_exist && !path.exists() {
            return Err(ConfigError::PathMissing { key, path });
        }
        Ok(path)
    }
}

/// Unset markers carried over from the scaffold: empty string and `"."`.
fn is_set(raw: &str) -> bool {
    !raw.is_empty() && raw != "."
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
