//! Unified-diff preview for `plugbridge diff`.
//!
//! Renders what a sync would change for text files only — additions show
//! against an empty old side, pending copies against the installed content.
//! Binary (mtime-classified) entries are listed by the CLI, not diffed.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::error::{io_err, SyncError};
use crate::plan::{is_text, SyncPlan};

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub relative: PathBuf,
    pub unified_diff: String,
}

/// Render unified diffs for the text entries of `plan`.
pub fn render(plan: &SyncPlan) -> Result<Vec<FileDiff>, SyncError> {
    let mut diffs = Vec::new();

    for entry in plan.add.iter().chain(plan.copy.iter()) {
        if !is_text(&entry.relative) {
            continue;
        }
        let old = if entry.installed.exists() {
            read_lossy(&entry.installed)?
        } else {
            String::new()
        };
        let new = read_lossy(&entry.source)?;
        if old == new {
            continue;
        }

        let old_header = format!("a/{}", entry.relative.display());
        let new_header = format!("b/{}", entry.relative.display());
        let unified = TextDiff::from_lines(&old, &new)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            relative: entry.relative.clone(),
            unified_diff: unified,
        });
    }

    Ok(diffs)
}

fn read_lossy(path: &Path) -> Result<String, SyncError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
