// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::index::SourceError;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports and tests hold on to them)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid application metadata: {0}")]
    InvalidMeta(String),

    /// The existing target file could not be structurally indexed.
    #[error("Cannot index {}: {error} (line {line}, column {column})", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        error: SourceError,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("No '{role}' directory configured")]
    MissingDirectory { role: String },

    #[error("No import path registered for package key '{key}'")]
    UnresolvedImport { key: String },
}

impl DomainError {
    /// Build a [`DomainError::Parse`] with a 1-based line and column computed
    /// from the error offset inside `source`.
    pub fn parse(path: impl AsRef<Path>, source: &str, error: SourceError) -> Self {
        let (line, column) = line_column(source, error.offset());
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            line,
            column,
            error,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidMeta(msg) => vec![
                "Check the application name and directory settings".into(),
                format!("Details: {}", msg),
            ],
            Self::Parse { path, line, .. } => vec![
                format!("Fix the syntax error in {} near line {}", path.display(), line),
                "The file was left untouched; re-run once it compiles".into(),
            ],
            Self::MissingDirectory { role } => vec![
                format!("Configure the '{}' directory", role),
                format!("Pass --{}-dir or set [dirs] {} in rootgen.toml", role, role),
            ],
            Self::UnresolvedImport { key } => vec![
                format!("Register an import path for '{}'", key),
                format!("Add `{} = \"<import path>\"` under [imports]", key),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidMeta(_) | Self::Parse { .. } => ErrorCategory::Validation,
            Self::MissingDirectory { .. } | Self::UnresolvedImport { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}

/// Error categories shared by every layer of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}
