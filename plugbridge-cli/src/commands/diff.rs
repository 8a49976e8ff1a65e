//! `plugbridge diff` — unified diff of what sync would overwrite.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use plugbridge_sync::{
    diff,
    pipeline::{self, SyncMode},
    plan::is_text,
};

/// Arguments for `plugbridge diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Path to the config file (default: ./plugbridge.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let (config, base_dir) = super::load_config(self.config.as_deref())?;
        let report =
            pipeline::run(&config, &base_dir, SyncMode::DryRun).context("diff failed")?;

        if report.plan.is_empty() {
            println!("Nothing to sync.");
            return Ok(());
        }

        let diffs = diff::render(&report.plan).context("cannot render diff")?;
        for file_diff in &diffs {
            print!("{}", file_diff.unified_diff);
        }
        for entry in report.plan.copy.iter().filter(|e| !is_text(&e.relative)) {
            println!("Binary file changed: {}", entry.relative.display());
        }
        for entry in &report.plan.delete {
            println!("Installed file without source counterpart: {}", entry.relative.display());
        }
        Ok(())
    }
}
