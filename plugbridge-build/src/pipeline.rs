//! Build pipeline entrypoint: resolve paths → assemble workspace → archive.
//!
//! The workspace parent is a uniquely named `TempDir` owned by this
//! function, so teardown is unconditional: every early return and the
//! success path alike remove it from disk.

use std::path::{Path, PathBuf};

use plugbridge_core::{Config, PackageIdentity, PathResolver, VENDOR_DIR_NAME};

use crate::archive;
use crate::deps::DependencyManifest;
use crate::error::{io_err, BuildError};
use crate::resolver::DependencyResolver;
use crate::workspace;

/// Summary of a completed build.
#[derive(Debug)]
pub struct BuildReport {
    pub archive_path: PathBuf,
    pub package: PackageIdentity,
    pub registry_count: usize,
    pub vcs_count: usize,
}

/// Run the build pipeline for `config`, materializing vcs dependencies
/// through `resolver`. `base_dir` is the directory of the loaded config
/// file.
pub fn run(
    config: &Config,
    base_dir: &Path,
    resolver: &dyn DependencyResolver,
) -> Result<BuildReport, BuildError> {
    let paths = PathResolver::new(config, base_dir);
    let package = paths.package()?.clone();
    let source_root = paths.source_root()?;
    let dist_dir = paths.dist_dir()?;
    let manifest = DependencyManifest::load(&paths.manifest()?)?;

    tracing::info!("building {} {}", package.name, package.version);

    let workspace_parent = tempfile::tempdir().map_err(|e| io_err("<tempdir>", e))?;
    let top_level = format!("{}-{}", package.name, package.version);
    let workspace_root = workspace_parent.path().join(&top_level);

    let built = workspace::build(
        &source_root,
        &workspace_root,
        VENDOR_DIR_NAME,
        &manifest,
        resolver,
    )?;

    let archive_path = archive::archive(
        workspace_parent.path(),
        &dist_dir,
        &format!("{top_level}.zip"),
    )?;

    // Reclaim the workspace on the success path too, surfacing any error;
    // the error paths above are covered by the TempDir drop.
    let parent_path = workspace_parent.path().to_path_buf();
    workspace_parent
        .close()
        .map_err(|e| io_err(parent_path, e))?;

    Ok(BuildReport {
        archive_path,
        package,
        registry_count: built.registry_count,
        vcs_count: built.vcs_count,
    })
}
