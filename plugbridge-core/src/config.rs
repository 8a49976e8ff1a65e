//! Versioned `plugbridge.toml` configuration.
//!
//! # Current schema (version 2)
//!
//! ```toml
//! version = 2
//!
//! [package]
//! name = "my-plugin"
//! version = "0.1.0"
//!
//! [paths]
//! source_root = "src"
//! installed_root = "/opt/host/addons/my-plugin"
//! dist_dir = "dist"
//! # manifest = "requirements.txt"        (optional)
//! # host_root = "host-4.2"               (optional)
//! # host_executable = "bin/host"         (optional, relative to host_root)
//! ```
//!
//! Earlier releases shipped a versionless flat `[addon]` table. That shape is
//! still accepted: parsing goes through an untagged compat enum and a single
//! migration function maps it onto the current schema.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 2;

// ---------------------------------------------------------------------------
// Schema (version 2)
// ---------------------------------------------------------------------------

/// Package identity used to name the build workspace and the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
}

/// Raw, unresolved path fields. Empty strings and `"."` count as unset;
/// resolution against the config directory happens in [`crate::paths`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPaths {
    /// Editable plugin source tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_root: Option<String>,

    /// Live copy inside the host application, overwritten by sync.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_root: Option<String>,

    /// Where the distribution archive is written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist_dir: Option<String>,

    /// Dependency-specifier manifest; defaults to
    /// `<source_root>/requirements.txt` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,

    /// Local host-application installation, used by `launch` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_root: Option<String>,

    /// Host executable relative to `host_root`, used by `launch` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_executable: Option<String>,
}

/// The validated configuration record. Constructed once at process start and
/// passed by reference into every pipeline — no global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageIdentity>,
    #[serde(default)]
    pub paths: ConfigPaths,
}

// ---------------------------------------------------------------------------
// Legacy schema (versionless flat [addon] table) + migration
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LegacyConfig {
    addon: LegacyAddonTable,
}

// Other legacy keys (startup script path, host version) had no successor
// and are ignored on load.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyAddonTable {
    src_code_rel_path: String,
    installation_rel_path: String,
    distribution_rel_path: String,
    host_rel_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigCompat {
    Versioned(Config),
    Legacy(LegacyConfig),
}

/// Map the legacy flat table onto the current schema.
///
/// Legacy files carried no package identity (it lived in a separate package
/// manifest back then), so `package` stays `None` and `build` reports it as a
/// missing field until the user fills it in.
fn migrate_legacy(legacy: LegacyAddonTable) -> Config {
    Config {
        version: SCHEMA_VERSION,
        package: None,
        paths: ConfigPaths {
            source_root: non_empty(legacy.src_code_rel_path),
            installed_root: non_empty(legacy.installation_rel_path),
            dist_dir: non_empty(legacy.distribution_rel_path),
            manifest: None,
            host_root: non_empty(legacy.host_rel_path),
            host_executable: None,
        },
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// ---------------------------------------------------------------------------
// Load / scaffold
// ---------------------------------------------------------------------------

/// Load and validate the configuration at `path`.
///
/// Returns `ConfigError::Parse` (with path + line context) on malformed TOML
/// and `ConfigError::UnsupportedVersion` for schema versions newer than this
/// build understands. Legacy versionless files are migrated transparently.
pub fn load_at(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let compat: ConfigCompat =
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
    let config = match compat {
        ConfigCompat::Versioned(config) => config,
        ConfigCompat::Legacy(legacy) => migrate_legacy(legacy.addon),
    };
    if config.version > SCHEMA_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: config.version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(config)
}

/// A fill-in-the-blanks config for `plugbridge init`.
pub fn scaffold() -> Config {
    Config {
        version: SCHEMA_VERSION,
        package: Some(PackageIdentity {
            name: "my-plugin".to_string(),
            version: "0.1.0".to_string(),
        }),
        paths: ConfigPaths {
            source_root: Some(String::new()),
            installed_root: Some(String::new()),
            dist_dir: Some(String::new()),
            manifest: None,
            host_root: None,
            host_executable: None,
        },
    }
}

/// Serialize `config` and write it to `path`. Used by `init` scaffolding.
pub fn save_at(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let toml = toml::to_string_pretty(config)?;
    std::fs::write(path, toml).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
