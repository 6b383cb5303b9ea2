//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use rootgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{RootgenError, RootgenResult},
};
use tracing::debug;

/// Production filesystem implementation using `std::fs`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so an interrupted run never leaves a half-written root file.
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
    fn create_dir_all(&self, path: &Path) -> RootgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_to_string(&self, path: &Path) -> RootgenResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "read file")),
        }
    }

    fn write_file(&self, path: &Path, content: &str) -> RootgenResult<()> {
        let tmp = temp_path(path);
        std::fs::write(&tmp, content).map_err(|e| map_io_error(&tmp, e, "write file"))?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(map_io_error(path, e, "replace file"));
        }
        debug!(path = %path.display(), bytes = content.len(), "File written");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".rootgen-tmp");
    path.with_file_name(name)
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> RootgenError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
