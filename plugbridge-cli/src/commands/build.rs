//! `plugbridge build` — package the plugin for distribution.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use plugbridge_build::{pipeline, PipResolver};

/// Arguments for `plugbridge build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Python interpreter whose pip materializes vcs dependencies.
    #[arg(long, value_name = "EXE", default_value = "python3")]
    pub python: PathBuf,

    /// Path to the config file (default: ./plugbridge.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let (config, base_dir) = super::load_config(self.config.as_deref())?;
        let resolver = PipResolver::new(self.python);

        let report = pipeline::run(&config, &base_dir, &resolver).context("build failed")?;

        println!(
            "{} Built {} {}",
            "✓".green(),
            report.package.name,
            report.package.version
        );
        println!("  Archive: {}", report.archive_path.display());
        println!(
            "  Dependencies: {} registry-installed, {} vendored",
            report.registry_count, report.vcs_count
        );
        Ok(())
    }
}
