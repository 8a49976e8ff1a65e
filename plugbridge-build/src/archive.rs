//! Distribution archive serialization.
//!
//! The archive is written with uniform deflate compression, entry paths
//! relative to the workspace parent, and replace-not-merge semantics at the
//! destination.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::error::{io_err, BuildError};

/// Path segments excluded from the archive wherever they occur: build
/// caches, version-control metadata, editor state.
pub const EXCLUDED_SEGMENTS: &[&str] = &["__pycache__", ".git", ".gitignore", ".vscode", ".idea"];

/// Serialize `workspace_parent` into `<dist_dir>/<archive_name>`.
///
/// Creates `dist_dir` if absent and deletes a pre-existing archive of the
/// same name first. Returns the archive path.
pub fn archive(
    workspace_parent: &Path,
    dist_dir: &Path,
    archive_name: &str,
) -> Result<PathBuf, BuildError> {
    std::fs::create_dir_all(dist_dir).map_err(|e| io_err(dist_dir, e))?;

    let archive_path = dist_dir.join(archive_name);
    if archive_path.exists() {
        tracing::debug!("replacing existing archive {}", archive_path.display());
        std::fs::remove_file(&archive_path).map_err(|e| io_err(&archive_path, e))?;
    }

    let file = File::create(&archive_path).map_err(|e| io_err(&archive_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(workspace_parent).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(workspace_parent) else {
            continue;
        };
        if is_excluded(relative) {
            continue;
        }
        zip.start_file(entry_name(relative), options)
            .map_err(|e| zip_err(&archive_path, e))?;
        let bytes = std::fs::read(entry.path()).map_err(|e| io_err(entry.path(), e))?;
        zip.write_all(&bytes).map_err(|e| io_err(&archive_path, e))?;
    }

    let mut inner = zip.finish().map_err(|e| zip_err(&archive_path, e))?;
    inner.flush().map_err(|e| io_err(&archive_path, e))?;
    tracing::info!("archive written: {}", archive_path.display());
    Ok(archive_path)
}

/// True when any segment of `relative` (including the file name) is an
/// excluded marker.
fn is_excluded(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(name) => EXCLUDED_SEGMENTS.iter().any(|s| name == *s),
        _ => false,
    })
}

/// Zip entry names always use forward slashes.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn zip_err(path: &Path, source: zip::result::ZipError) -> BuildError {
    BuildError::Archive {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
