//! Dependency materialization behind a capability interface.
//!
//! The build pipeline never talks to a package manager directly; it hands
//! pinned specifiers to a [`DependencyResolver`], which puts each package's
//! files into a target directory with no transitive resolution. Tests swap
//! in a fake; production uses pip through the host's Python.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::deps::DependencySpec;
use crate::error::{io_err, BuildError};

/// Materialize pinned specifiers into a directory, exact pins only.
pub trait DependencyResolver {
    fn materialize(&self, specs: &[DependencySpec], target_dir: &Path) -> Result<(), BuildError>;
}

/// Pip-backed resolver: `python -m pip install -r <specs> -t <target>
/// --no-deps`, run as a synchronous blocking subprocess.
pub struct PipResolver {
    python: PathBuf,
}

impl PipResolver {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn tool(&self) -> String {
        format!("{} -m pip", self.python.display())
    }
}

impl Default for PipResolver {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl DependencyResolver for PipResolver {
    fn materialize(&self, specs: &[DependencySpec], target_dir: &Path) -> Result<(), BuildError> {
        if specs.is_empty() {
            return Ok(());
        }

        // pip wants its input as a requirements file.
        let mut spec_file =
            tempfile::NamedTempFile::new().map_err(|e| io_err("<tempfile>", e))?;
        for spec in specs {
            writeln!(spec_file, "{spec}").map_err(|e| io_err(spec_file.path(), e))?;
        }

        tracing::info!(
            "materializing {} vcs dependencies into {}",
            specs.len(),
            target_dir.display()
        );
        let output = Command::new(&self.python)
            .arg("-m")
            .arg("pip")
            .arg("install")
            .arg("--no-deps")
            .arg("-r")
            .arg(spec_file.path())
            .arg("-t")
            .arg(target_dir)
            .output()
            .map_err(|e| BuildError::ResolverUnavailable {
                tool: self.tool(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(BuildError::ResolverFailed {
                tool: self.tool(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_spec_list_is_a_noop_without_spawning() {
        let target = TempDir::new().unwrap();
        let resolver = PipResolver::new("this-binary-does-not-exist-anywhere");
        resolver
            .materialize(&[], target.path())
            .expect("empty specs must not invoke the tool");
    }

    #[test]
    fn missing_tool_is_resolver_unavailable() {
        let target = TempDir::new().unwrap();
        let resolver = PipResolver::new("this-binary-does-not-exist-anywhere");
        let specs = vec![DependencySpec(
            "git+https://example.com/org/pkg.git@v1".to_string(),
        )];
        let err = resolver.materialize(&specs, target.path()).unwrap_err();
        assert!(matches!(err, BuildError::ResolverUnavailable { .. }));
    }
}
