//! Shared sync pipeline entrypoint used by the CLI.

use std::path::Path;

use plugbridge_core::{Config, PathResolver};

use crate::apply::{self, SyncOutcome};
use crate::error::SyncError;
use crate::plan::{self, SyncPlan, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES};

/// Whether to mutate the installed tree or only report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Apply,
    DryRun,
}

/// Outcome of one sync invocation. `outcome` is `None` in dry-run mode.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub plan: SyncPlan,
    pub outcome: Option<SyncOutcome>,
}

/// Run the sync pipeline: resolve paths, compute the plan, apply it.
///
/// This is the canonical entrypoint for `plugbridge sync` and
/// `plugbridge diff`. `base_dir` is the directory of the loaded config file.
pub fn run(config: &Config, base_dir: &Path, mode: SyncMode) -> Result<SyncReport, SyncError> {
    let resolver = PathResolver::new(config, base_dir);
    let source_root = resolver.source_root()?;
    let installed_root = resolver.installed_root()?;
    tracing::debug!(
        "sync {} -> {}",
        source_root.display(),
        installed_root.display()
    );

    let plan = plan::compute(
        &source_root,
        &installed_root,
        DEFAULT_EXCLUDED_DIRS,
        DEFAULT_EXCLUDED_FILES,
    )?;

    let outcome = match mode {
        SyncMode::DryRun => None,
        SyncMode::Apply => Some(apply::apply(&plan)?),
    };

    Ok(SyncReport { plan, outcome })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
