//! `plugbridge sync` — reconcile the installed copy with the source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use plugbridge_sync::{
    pipeline::{self, SyncMode},
    SyncPlan,
};

/// Arguments for `plugbridge sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Show what would change without touching the installed tree.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the computed plan as JSON (dry-run only).
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Path to the config file (default: ./plugbridge.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let (config, base_dir) = super::load_config(self.config.as_deref())?;
        let mode = if self.dry_run {
            SyncMode::DryRun
        } else {
            SyncMode::Apply
        };

        let report = pipeline::run(&config, &base_dir, mode).context("sync failed")?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report.plan)?);
            return Ok(());
        }

        print_plan(&report.plan, self.dry_run);
        if let Some(outcome) = report.outcome {
            if outcome.total() > 0 {
                println!(
                    "{} {} added, {} copied, {} deleted.",
                    "✓".green(),
                    outcome.added,
                    outcome.copied,
                    outcome.deleted
                );
            }
        }
        Ok(())
    }
}

fn print_plan(plan: &SyncPlan, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    if plan.is_empty() {
        println!("{prefix}Nothing to sync.");
        return;
    }
    if !plan.add.is_empty() {
        println!("{prefix}{} file(s) to add:", plan.add.len());
        for entry in &plan.add {
            println!("  + {}", entry.relative.display());
        }
    }
    if !plan.copy.is_empty() {
        println!("{prefix}{} file(s) to copy:", plan.copy.len());
        for entry in &plan.copy {
            println!("  ~ {}", entry.relative.display());
        }
    }
    if !plan.delete.is_empty() {
        println!("{prefix}{} file(s) to delete:", plan.delete.len());
        for entry in &plan.delete {
            println!("  - {}", entry.relative.display());
        }
    }
}
