//! Plan application: add → copy → delete.
//!
//! The three path sets are disjoint, so deletions can never touch a file
//! the add/copy steps still need.

use serde::Serialize;

use crate::error::{io_err, SyncError};
use crate::plan::SyncPlan;

/// Counts reported after applying a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub added: usize,
    pub copied: usize,
    pub deleted: usize,
}

impl SyncOutcome {
    pub fn total(&self) -> usize {
        self.added + self.copied + self.deleted
    }
}

/// Apply `plan` to the installed tree.
///
/// `add` creates missing parent directories before copying; `copy`
/// overwrites in place; `delete` removes the file. Applying an empty plan
/// is a no-op that returns all-zero counts.
pub fn apply(plan: &SyncPlan) -> Result<SyncOutcome, SyncError> {
    for entry in &plan.add {
        if let Some(parent) = entry.installed.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        std::fs::copy(&entry.source, &entry.installed)
            .map_err(|e| io_err(&entry.installed, e))?;
        tracing::info!("added: {}", entry.relative.display());
    }

    for entry in &plan.copy {
        std::fs::copy(&entry.source, &entry.installed)
            .map_err(|e| io_err(&entry.installed, e))?;
        tracing::info!("copied: {}", entry.relative.display());
    }

    for entry in &plan.delete {
        std::fs::remove_file(&entry.installed).map_err(|e| io_err(&entry.installed, e))?;
        tracing::info!("deleted: {}", entry.relative.display());
    }

    Ok(SyncOutcome {
        added: plan.add.len(),
        copied: plan.copy.len(),
        deleted: plan.delete.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
