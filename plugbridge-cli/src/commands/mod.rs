//! Subcommand implementations.

pub mod build;
pub mod diff;
pub mod init;
pub mod launch;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use plugbridge_core::{config, Config, CONFIG_FILE_NAME};

/// Load the configuration for a command: an explicit `--config` path, or
/// `plugbridge.toml` in the current directory.
///
/// Returns the config together with the directory relative paths resolve
/// against (the config file's parent).
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, PathBuf)> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };
    let config = config::load_at(&path).with_context(|| {
        format!(
            "cannot load '{}' (run `plugbridge init` to scaffold one)",
            path.display()
        )
    })?;
    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((config, base_dir))
}
