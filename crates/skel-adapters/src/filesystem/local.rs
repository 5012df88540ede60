//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use skel_core::{
    application::{ApplicationError, ports::Filesystem},
    domain::OverwritePolicy,
    error::{SkelError, SkelResult},
};
use tracing::debug;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> SkelResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str, policy: OverwritePolicy) -> SkelResult<()> {
        let mut options = OpenOptions::new();
        options.write(true);
        match policy {
            // create_new fails if the file already exists.
            OverwritePolicy::Fail => options.create_new(true),
            OverwritePolicy::Overwrite => options.create(true).truncate(true),
        };

        let mut file = options.open(path).map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ApplicationError::WriteConflict {
                path: path.to_path_buf(),
            }
            .into(),
            _ => map_io_error(path, e, "open file"),
        })?;

        file.write_all(content.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| map_io_error(path, e, "write file"))?;

        debug!(path = %path.display(), bytes = content.len(), ?policy, "File written");
        Ok(())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SkelError {
    ApplicationError::IoFailure {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
