//! Generic JSON document I/O.
//!
//! The file handle lives only for the duration of one call: the whole
//! document is read into memory, parsed, and the handle is dropped.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Read and parse a JSON document.
///
/// # Errors
/// `StoreError::File` if the path cannot be read, `StoreError::Parse` if
/// the content is not valid JSON for `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::File {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize `value` as pretty JSON and write it to `path`.
///
/// Missing parent directories are created.
///
/// # Errors
/// `StoreError::Encode` if serialization fails, `StoreError::Write` on I/O.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(StoreError::Encode)?;

    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json + "\n").map_err(write_err)
}

/// File name component of a path, for display.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// TESTS
// ============================================================================
