//! Sync plan computation.
//!
//! The plan is a pure function of the two trees' current on-disk state —
//! recomputed from scratch on every invocation, never persisted.
//!
//! ## Classification policy, per source file relative path
//!
//! - no installed counterpart → **add**
//! - counterpart exists, known text extension → byte-level content compare,
//!   **copy** on any difference
//! - counterpart exists, any other extension → **copy** iff the source mtime
//!   is strictly newer (the `deps_installed` marker is exempt)
//!
//! Installed files with no source counterpart are **delete**, unless under
//! an excluded directory name or carrying an excluded file name.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use walkdir::WalkDir;

use plugbridge_core::{DEPS_INSTALLED_MARKER, VENDOR_DIR_NAME};

use crate::error::{io_err, SyncError};

/// Extensions compared by content. Everything else falls back to mtime.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "py", "txt", "json", "toml", "yaml", "yml", "md", "html", "css", "js", "qss",
];

/// Directory names excluded from the installed-tree scan. The vendor dir
/// and bytecode caches are host-materialized, not synced content.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["__pycache__", VENDOR_DIR_NAME];

/// File names excluded from delete detection.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[DEPS_INSTALLED_MARKER];

// ---------------------------------------------------------------------------
// Plan types
// ---------------------------------------------------------------------------

/// A source file headed for the installed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// Path relative to both roots.
    pub relative: PathBuf,
    pub source: PathBuf,
    pub installed: PathBuf,
}

/// An installed file with no source counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteEntry {
    /// Path relative to the installed root.
    pub relative: PathBuf,
    pub installed: PathBuf,
}

/// The add/copy/delete classification for one sync invocation.
///
/// Invariant: a relative path appears in at most one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub add: Vec<PlanEntry>,
    pub copy: Vec<PlanEntry>,
    pub delete: Vec<DeleteEntry>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.copy.is_empty() && self.delete.is_empty()
    }

    pub fn len(&self) -> usize {
        self.add.len() + self.copy.len() + self.delete.len()
    }
}

// ---------------------------------------------------------------------------
// compute
// ---------------------------------------------------------------------------

/// Compute the sync plan between `source_root` and `installed_root`.
///
/// `excluded_dirs` prunes installed-tree directories by name (at any depth);
/// `excluded_files` exempts installed file names from delete detection.
/// Files are visited in deterministic lexicographic walk order.
pub fn compute(
    source_root: &Path,
    installed_root: &Path,
    excluded_dirs: &[&str],
    excluded_files: &[&str],
) -> Result<SyncPlan, SyncError> {
    let mut plan = SyncPlan::default();

    for entry in WalkDir::new(source_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(source_root) else {
            continue;
        };
        let installed = installed_root.join(relative);
        let item = PlanEntry {
            relative: relative.to_path_buf(),
            source: entry.path().to_path_buf(),
            installed: installed.clone(),
        };

        if !installed.exists() {
            tracing::debug!("add: {}", relative.display());
            plan.add.push(item);
        } else if is_text(relative) {
            if read_bytes(entry.path())? != read_bytes(&installed)? {
                tracing::debug!("copy (content): {}", relative.display());
                plan.copy.push(item);
            }
        } else if entry.file_name() != DEPS_INSTALLED_MARKER
            && mtime(entry.path())? > mtime(&installed)?
        {
            tracing::debug!("copy (mtime): {}", relative.display());
            plan.copy.push(item);
        }
    }

    if installed_root.exists() {
        let walker = WalkDir::new(installed_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.file_type().is_dir() && matches_name(e.file_name(), excluded_dirs))
            });
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if matches_name(entry.file_name(), excluded_files) {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(installed_root) else {
                continue;
            };
            if !source_root.join(relative).exists() {
                tracing::debug!("delete: {}", relative.display());
                plan.delete.push(DeleteEntry {
                    relative: relative.to_path_buf(),
                    installed: entry.path().to_path_buf(),
                });
            }
        }
    }

    Ok(plan)
}

/// True when the file's extension is in the text set (case-insensitive).
pub fn is_text(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
        .unwrap_or(false)
}

fn matches_name(name: &std::ffi::OsStr, set: &[&str]) -> bool {
    set.iter().any(|s| name == *s)
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, SyncError> {
    std::fs::read(path).map_err(|e| io_err(path, e))
}

fn mtime(path: &Path) -> Result<SystemTime, SyncError> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| io_err(path, e))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
