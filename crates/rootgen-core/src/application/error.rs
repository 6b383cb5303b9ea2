//! Application layer errors.
//!
//! These errors represent failures in orchestration, not generation logic.
//! Generation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// The file to inspect does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Shared adapter state could not be locked (poisoned mutex).
    #[error("Filesystem state lock poisoned")]
    StoreLockError,

    /// The project manifest could not be read or parsed.
    #[error("Invalid manifest {}: {reason}", path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    /// Merged output no longer indexes cleanly; nothing was written.
    #[error("Refusing to write {}: {reason}", path.display())]
    EmitFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the project root exists".into(),
            ],
            Self::FileNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Run `rootgen generate` to create it".into(),
            ],
            Self::StoreLockError => vec![
                "Internal state was poisoned by an earlier panic".into(),
                "Try again in a moment".into(),
            ],
            Self::ManifestInvalid { path, .. } => vec![
                format!("Fix the TOML syntax in {}", path.display()),
                "Known sections are [app], [dirs] and [imports]".into(),
            ],
            Self::EmitFailed { .. } => vec![
                "This is a bug in rootgen; the target file was left untouched".into(),
                "Please report it together with the file contents".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError | Self::EmitFailed { .. } => {
                ErrorCategory::Internal
            }
            Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::ManifestInvalid { .. } => ErrorCategory::Configuration,
        }
    }
}
