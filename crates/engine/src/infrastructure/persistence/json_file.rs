//! Byte writer for exported documents.
//!
//! Writes are not atomic: the target is truncated first, so a crash mid-write
//! leaves a partial file behind.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Errors from writing a document to disk.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Create (or truncate) `path` and write all of `data` to it.
///
/// Failing to sync the file after a successful write is logged and ignored.
pub fn write_to_file(path: impl AsRef<Path>, data: &[u8]) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Writing data to file");

    let mut file = File::create(path).map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "Error creating file");
        PersistenceError::Create {
            path: path.to_path_buf(),
            source,
        }
    })?;

    file.write_all(data).map_err(|source| {
        tracing::error!(path = %path.display(), error = %source, "Error writing to file");
        PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if let Err(e) = file.sync_all() {
        tracing::warn!(path = %path.display(), error = %e, "Error closing file");
    }

    tracing::info!(
        path = %path.display(),
        bytes = data.len(),
        "Successfully wrote file"
    );
    Ok(())
}
