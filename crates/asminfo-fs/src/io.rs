//! Text read/write for metadata files.
//!
//! Writes overwrite the target in place. There is no temp-file-and-rename
//! step: the updater's contract is a plain read-modify-write of the original
//! filesystem entry.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a file's full text.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the path does not exist.
pub fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Overwrite a file with the given text.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    tracing::debug!(path = %path.display(), bytes = contents.len(), "writing file");
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}
