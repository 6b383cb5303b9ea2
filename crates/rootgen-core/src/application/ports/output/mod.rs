//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `rootgen-adapters` crate provides implementations.

use crate::error::RootgenResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `rootgen_adapters::filesystem::LocalFilesystem` (production)
/// - `rootgen_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> RootgenResult<()>;

    /// Read a UTF-8 file; `Ok(None)` when it does not exist.
    fn read_to_string(&self, path: &Path) -> RootgenResult<Option<String>>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> RootgenResult<()>;
}
