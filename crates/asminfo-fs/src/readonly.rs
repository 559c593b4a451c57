//! Scoped suspension of a file's read-only attribute.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Clears a file's read-only attribute for the guard's lifetime.
///
/// The attribute is restored on drop, so it is reinstated even when the
/// write performed under the guard fails. Files that were writable to begin
/// with are left untouched.
#[derive(Debug)]
pub struct ReadOnlyGuard {
    path: PathBuf,
    was_readonly: bool,
}

impl ReadOnlyGuard {
    /// Suspend the read-only attribute of `path` until the guard drops.
    pub fn acquire(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let mut permissions = metadata.permissions();
        let was_readonly = permissions.readonly();

        if was_readonly {
            tracing::debug!(path = %path.display(), "clearing read-only attribute");
            permissions.set_readonly(false);
            fs::set_permissions(path, permissions).map_err(|e| Error::io(path, e))?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            was_readonly,
        })
    }
}

impl Drop for ReadOnlyGuard {
    fn drop(&mut self) {
        if !self.was_readonly {
            return;
        }

        let restore = || -> std::io::Result<()> {
            let mut permissions = fs::metadata(&self.path)?.permissions();
            permissions.set_readonly(true);
            fs::set_permissions(&self.path, permissions)
        };

        if let Err(e) = restore() {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to restore read-only attribute"
            );
        } else {
            tracing::debug!(path = %self.path.display(), "restored read-only attribute");
        }
    }
}
