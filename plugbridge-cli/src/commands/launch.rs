//! `plugbridge launch` — run the host application.
//!
//! Uses the configured local installation; installing or downloading the
//! host binary is out of scope.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Args;

use plugbridge_core::PathResolver;

/// Arguments for `plugbridge launch`.
#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// Path to the config file (default: ./plugbridge.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl LaunchArgs {
    pub fn run(self) -> Result<()> {
        let (config, base_dir) = super::load_config(self.config.as_deref())?;
        let resolver = PathResolver::new(&config, &base_dir);
        let executable = resolver
            .host_executable()
            .context("launch needs paths.host_root and paths.host_executable")?;

        println!("Launching {}", executable.display());
        let status = Command::new(&executable)
            .status()
            .with_context(|| format!("cannot start '{}'", executable.display()))?;
        if !status.success() {
            bail!("host application exited with {status}");
        }
        Ok(())
    }
}
