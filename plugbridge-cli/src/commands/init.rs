//! `plugbridge init` — scaffold a default config file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use plugbridge_core::{config, CONFIG_FILE_NAME};

/// Arguments for `plugbridge init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the config (default: ./plugbridge.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let path = self
            .config
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        if path.exists() {
            println!(
                "'{}' already exists. Delete it and re-run to reset the defaults.",
                path.display()
            );
            return Ok(());
        }

        config::save_at(&path, &config::scaffold())
            .with_context(|| format!("cannot write '{}'", path.display()))?;
        println!("{} Wrote {}", "✓".green(), path.display());
        println!("  Fill in [package] and [paths] before running sync or build.");
        Ok(())
    }
}
