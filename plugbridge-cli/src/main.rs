//! plugbridge — plugin dev-loop CLI.
//!
//! # Usage
//!
//! ```text
//! plugbridge init [--config <path>]
//! plugbridge sync [--dry-run] [--json]
//! plugbridge diff
//! plugbridge build [--python <exe>]
//! plugbridge launch
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    build::BuildArgs, diff::DiffArgs, init::InitArgs, launch::LaunchArgs, sync::SyncArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "plugbridge",
    version,
    about = "Sync a plugin source tree into its host application and package it for distribution",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a plugbridge.toml with default values.
    Init(InitArgs),

    /// Reconcile the installed copy with the source tree.
    Sync(SyncArgs),

    /// Show unified diffs of what sync would overwrite.
    Diff(DiffArgs),

    /// Package the source tree plus vendored dependencies into a zip.
    Build(BuildArgs),

    /// Run the host application from the configured installation.
    Launch(LaunchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Build(args) => args.run(),
        Commands::Launch(args) => args.run(),
    }
}
