//! Isolated build workspace assembly.
//!
//! Each stage is a precondition-checked step that aborts the whole build on
//! failure. The workspace directory itself is owned by the caller
//! ([`crate::pipeline`]), which tears it down on every exit path.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::deps::DependencyManifest;
use crate::error::{io_err, BuildError};
use crate::resolver::DependencyResolver;

/// Registry-installable subset, consumed by the host-side installer.
pub const REGISTRY_MANIFEST_FILE: &str = "requirements_registry.txt";

/// Vendored subset, kept alongside the package for provenance.
pub const VCS_MANIFEST_FILE: &str = "requirements_vcs.txt";

/// What [`build`] materialized.
#[derive(Debug)]
pub struct WorkspaceBuildResult {
    pub workspace_root: PathBuf,
    pub registry_count: usize,
    pub vcs_count: usize,
}

/// Assemble the build workspace at `workspace_root`:
///
/// 1. fail with `SourceMissing` if `source_root` does not exist;
/// 2. create `workspace_root` (parents as needed);
/// 3. copy everything under `source_root` into it, preserving structure;
/// 4. split the manifest into the two installer files and materialize the
///    vcs subset into `workspace_root/<vendor_dir_name>` via `resolver`.
pub fn build(
    source_root: &Path,
    workspace_root: &Path,
    vendor_dir_name: &str,
    manifest: &DependencyManifest,
    resolver: &dyn DependencyResolver,
) -> Result<WorkspaceBuildResult, BuildError> {
    if !source_root.exists() {
        return Err(BuildError::SourceMissing {
            path: source_root.to_path_buf(),
        });
    }

    std::fs::create_dir_all(workspace_root).map_err(|e| io_err(workspace_root, e))?;

    copy_tree(source_root, workspace_root)?;

    let partition = manifest.partition();
    write_manifest(
        &workspace_root.join(REGISTRY_MANIFEST_FILE),
        &partition.registry,
    )?;
    write_manifest(&workspace_root.join(VCS_MANIFEST_FILE), &partition.vcs)?;

    if !partition.vcs.is_empty() {
        resolver.materialize(&partition.vcs, &workspace_root.join(vendor_dir_name))?;
    }

    Ok(WorkspaceBuildResult {
        workspace_root: workspace_root.to_path_buf(),
        registry_count: partition.registry.len(),
        vcs_count: partition.vcs.len(),
    })
}

/// Recursively copy the contents of `from` into `to`.
fn copy_tree(from: &Path, to: &Path) -> Result<(), BuildError> {
    for entry in WalkDir::new(from).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(from) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }
        let dest = to.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).map_err(|e| io_err(&dest, e))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            std::fs::copy(entry.path(), &dest).map_err(|e| io_err(&dest, e))?;
        }
    }
    Ok(())
}

fn write_manifest(path: &Path, specs: &[crate::deps::DependencySpec]) -> Result<(), BuildError> {
    let mut contents = specs
        .iter()
        .map(|s| s.0.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    std::fs::write(path, contents).map_err(|e| io_err(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deps::DependencySpec;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Test double: records the target dir and drops a fake module into it.
    struct FakeResolver {
        target: RefCell<Option<PathBuf>>,
    }

    impl FakeResolver {
        fn new() -> Self {
            Self {
                target: RefCell::new(None),
            }
        }
    }

    impl DependencyResolver for FakeResolver {
        fn materialize(
            &self,
            specs: &[DependencySpec],
            target_dir: &Path,
        ) -> Result<(), BuildError> {
            fs::create_dir_all(target_dir).map_err(|e| io_err(target_dir, e))?;
            for (i, _) in specs.iter().enumerate() {
                fs::write(target_dir.join(format!("vendored_{i}.py")), "pkg\n")
                    .map_err(|e| io_err(target_dir, e))?;
            }
            *self.target.borrow_mut() = Some(target_dir.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn missing_source_aborts_before_any_mutation() {
        let root = TempDir::new().unwrap();
        let workspace = root.path().join("ws");
        let err = build(
            &root.path().join("no-such-source"),
            &workspace,
            "libs",
            &DependencyManifest::default(),
            &FakeResolver::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::SourceMissing { .. }));
        assert!(!workspace.exists());
    }

    #[test]
    fn copies_source_and_writes_both_manifest_files() {
        let root = TempDir::new().unwrap();
        let source = root.path().join("src");
        fs::create_dir_all(source.join("ui")).unwrap();
        fs::write(source.join("plugin.py"), "p\n").unwrap();
        fs::write(source.join("ui").join("panel.py"), "q\n").unwrap();

        let manifest = DependencyManifest::parse(
            "requests==2.31.0\ngit+https://example.com/org/internal.git@v3\n",
        );
        let workspace = root.path().join("ws");
        let result = build(&source, &workspace, "libs", &manifest, &FakeResolver::new())
            .expect("build");

        assert_eq!(result.registry_count, 1);
        assert_eq!(result.vcs_count, 1);
        assert_eq!(fs::read_to_string(workspace.join("plugin.py")).unwrap(), "p\n");
        assert_eq!(
            fs::read_to_string(workspace.join("ui").join("panel.py")).unwrap(),
            "q\n"
        );
        assert_eq!(
            fs::read_to_string(workspace.join(REGISTRY_MANIFEST_FILE)).unwrap(),
            "requests==2.31.0\n"
        );
        assert_eq!(
            fs::read_to_string(workspace.join(VCS_MANIFEST_FILE)).unwrap(),
            "git+https://example.com/org/internal.git@v3\n"
        );
        assert!(workspace.join("libs").join("vendored_0.py").exists());
    }

    #[test]
    fn empty_vcs_subset_never_invokes_the_resolver() {
        struct PanickyResolver;
        impl DependencyResolver for PanickyResolver {
            fn materialize(&self, _: &[DependencySpec], _: &Path) -> Result<(), BuildError> {
                panic!("resolver must not run for a registry-only manifest");
            }
        }

        let root = TempDir::new().unwrap();
        let source = root.path().join("src");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("plugin.py"), "p\n").unwrap();

        let manifest = DependencyManifest::parse("requests==2.31.0\n");
        let workspace = root.path().join("ws");
        let result = build(&source, &workspace, "libs", &manifest, &PanickyResolver)
            .expect("build");
        assert_eq!(result.vcs_count, 0);
        assert!(!workspace.join("libs").exists());
        // The vcs manifest file is still written, just empty.
        assert_eq!(
            fs::read_to_string(workspace.join(VCS_MANIFEST_FILE)).unwrap(),
            ""
        );
    }
}
