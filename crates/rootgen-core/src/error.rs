//! Unified error handling for rootgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

pub use crate::domain::ErrorCategory;

/// Root error type for rootgen core operations.
///
/// This enum wraps all possible errors that can occur when using rootgen-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RootgenError {
    /// Errors from the domain layer (generation rules, parsing).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl RootgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }
}

/// Convenient result type alias.
pub type RootgenResult<T> = Result<T, RootgenError>;
