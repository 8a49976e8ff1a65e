//! Dependency manifest parsing and Registry/Vcs partitioning.
//!
//! Registry specifiers are resolved into the host's own runtime at install
//! time by a separate installer, so that resolution stays compatible with
//! the host's existing dependency graph. VCS specifiers have no such
//! late-resolution path and must be vendored bit-for-bit into the package.

use std::fmt;
use std::path::Path;

use crate::error::{io_err, BuildError};

/// Specifier prefixes marking a version-control source locator.
pub const VCS_PREFIXES: &[&str] = &["git+", "hg+", "svn+", "bzr+"];

/// A single dependency specifier line, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec(pub String);

impl DependencySpec {
    pub fn kind(&self) -> DependencyKind {
        if VCS_PREFIXES.iter().any(|p| self.0.contains(p)) {
            DependencyKind::Vcs
        } else {
            DependencyKind::Registry
        }
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How a specifier is delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// Resolvable by name/version from a package index at install time.
    Registry,
    /// Pinned to a version-control locator; vendored at build time.
    Vcs,
}

/// A flat, ordered dependency manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyManifest {
    pub specs: Vec<DependencySpec>,
}

/// The manifest split into its two delivery classes, order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub registry: Vec<DependencySpec>,
    pub vcs: Vec<DependencySpec>,
}

impl DependencyManifest {
    /// Parse newline-delimited specifiers. Blank lines and `#` comments are
    /// skipped; everything else is kept verbatim.
    pub fn parse(text: &str) -> Self {
        let specs = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| DependencySpec(line.to_string()))
            .collect();
        Self { specs }
    }

    /// Load a manifest file. A missing file is an empty manifest — the
    /// plugin simply has no third-party dependencies.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        if !path.exists() {
            tracing::debug!("no manifest at {}; empty", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Split into registry-installable and must-be-vendored subsets.
    pub fn partition(&self) -> Partition {
        let mut partition = Partition::default();
        for spec in &self.specs {
            match spec.kind() {
                DependencyKind::Registry => partition.registry.push(spec.clone()),
                DependencyKind::Vcs => partition.vcs.push(spec.clone()),
            }
        }
        partition
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
