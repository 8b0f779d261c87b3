//! Plan persistence: write/read a [`PlanRecord`] as pretty JSON on disk.
//!
//! The file is written to a temp sibling and renamed into place, so a
//! reader never observes a half-written plan.

use std::path::{Path, PathBuf};

use choreo_kernel::proof::hash::ContentHash;

use crate::report::PlanRecord;

/// Default output file name, relative to the working directory.
pub const DEFAULT_PLAN_FILENAME: &str = "choreography_output.json";

/// Error writing a plan file.
#[derive(Debug, thiserror::Error)]
pub enum PlanWriteError {
    #[error("I/O error: {detail}")]
    Io { detail: String },
    #[error("cannot serialize plan: {0}")]
    Json(#[from] serde_json::Error),
    #[error("canonical JSON error: {detail}")]
    Canon { detail: String },
}

/// Error reading a plan file.
#[derive(Debug, thiserror::Error)]
pub enum PlanReadError {
    #[error("cannot read plan {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed plan file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `record` to `path` and return its canonical digest.
///
/// Creates the parent directory if needed.
///
/// # Errors
///
/// Returns [`PlanWriteError`] on I/O, serialization or canonicalization
/// failure.
pub fn write_plan(record: &PlanRecord, path: &Path) -> Result<ContentHash, PlanWriteError> {
    let digest = record.digest().map_err(|e| PlanWriteError::Canon {
        detail: e.to_string(),
    })?;
    let mut text = record.to_json_pretty()?;
    text.push('\n');

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| PlanWriteError::Io {
            detail: format!("create_dir_all {}: {e}", dir.display()),
        })?;
    }
    write_atomic(path, text.as_bytes())?;

    tracing::info!(path = %path.display(), digest = %digest, moves = record.sequence.len(), "plan saved");
    Ok(digest)
}

/// Read a plan file written by [`write_plan`].
///
/// # Errors
///
/// Returns [`PlanReadError`] if the file is missing or malformed.
pub fn read_plan(path: &Path) -> Result<PlanRecord, PlanReadError> {
    let bytes = std::fs::read(path).map_err(|source| PlanReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<(), PlanWriteError> {
    let file_name = path.file_name().ok_or_else(|| PlanWriteError::Io {
        detail: format!("no file name in {}", path.display()),
    })?;
    let temp_path = path.with_file_name(format!(".tmp_{}", file_name.to_string_lossy()));

    std::fs::write(&temp_path, content).map_err(|e| PlanWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| PlanWriteError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })?;

    Ok(())
}
