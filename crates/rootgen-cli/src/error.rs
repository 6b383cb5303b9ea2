//! Error handling for the rootgen CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Source snippets for Go syntax errors
//! - Exit code mapping

use std::error::Error;
use std::path::Path;

use miette::{GraphicalReportHandler, GraphicalTheme, NamedSource, ThemeCharacters, ThemeStyles};
use owo_colors::OwoColorize;
use thiserror::Error;

use rootgen_core::{
    domain::{DomainError, SourceError},
    error::RootgenError,
};

// Re-export so callers only need `use crate::error::*`.
pub use rootgen_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `rootgen-core` or the adapters.
    #[error("Generation failed: {0}")]
    Core(#[from] RootgenError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Run 'rootgen config path' to see which file is read".into(),
                "Use 'rootgen init --force' to recreate a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// The Go syntax error behind this error, with the file it came from.
    pub fn source_error(&self) -> Option<(&Path, &SourceError)> {
        match self {
            Self::Core(RootgenError::Domain(DomainError::Parse { path, error, .. })) => {
                Some((path.as_path(), error))
            }
            _ => None,
        }
    }

    /// Render the offending source with the error span underlined.
    ///
    /// The file is read again; `None` when it is gone or this is not a
    /// syntax error.
    pub fn render_snippet(&self, color: bool) -> Option<String> {
        let (path, error) = self.source_error()?;
        let source = std::fs::read_to_string(path).ok()?;
        Some(render_source_error(path, &source, error, color))
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        // Error header
        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        // Main error message
        output.push_str(&format!("  {}\n", self.to_string().red()));

        // Error chain (if verbose)
        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        if let Some(snippet) = self.render_snippet(true) {
            output.push('\n');
            output.push_str(&snippet);
        }

        // Suggestions
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        // Hint to re-run with -v
        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        if let Some(snippet) = self.render_snippet(false) {
            out.push('\n');
            out.push_str(&snippet);
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, broken Go source).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

/// Render a Go syntax error against its source with miette.
pub fn render_source_error(path: &Path, source: &str, error: &SourceError, color: bool) -> String {
    let theme = if color {
        GraphicalTheme {
            characters: ThemeCharacters::unicode(),
            styles: ThemeStyles::ansi(),
        }
    } else {
        GraphicalTheme {
            characters: ThemeCharacters::ascii(),
            styles: ThemeStyles::none(),
        }
    };
    let report = miette::Report::new(error.clone()).with_source_code(NamedSource::new(
        path.display().to_string(),
        source.to_string(),
    ));

    let mut output = String::new();
    if GraphicalReportHandler::new_themed(theme)
        .render_report(&mut output, report.as_ref())
        .is_err()
    {
        output.clear();
    }
    output
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert `std::io` failures into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootgen_core::{application::ApplicationError, domain::DeclarationIndex};
    use std::io;
    use std::path::PathBuf;

    fn parse_error(path: &Path, source: &str) -> CliError {
        let err = DeclarationIndex::parse(source).unwrap_err();
        CliError::Core(DomainError::parse(path, source, err).into())
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn unresolved_import_suggests_registry_entry() {
        let err = CliError::Core(
            DomainError::UnresolvedImport {
                key: "hdsdk".into(),
            }
            .into(),
        );
        assert!(err.suggestions().iter().any(|s| s.contains("[imports]")));
    }

    #[test]
    fn config_error_suggestions_mention_init() {
        let err = CliError::ConfigError {
            message: "bad".into(),
            source: None,
        };
        assert!(err.suggestions().iter().any(|s| s.contains("rootgen init")));
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            2
        );
        assert_eq!(
            parse_error(Path::new("root.go"), "package cmd\nfunc (\n").exit_code(),
            2
        );
    }

    #[test]
    fn exit_code_not_found() {
        let err = CliError::Core(
            ApplicationError::FileNotFound {
                path: PathBuf::from("x.go"),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        let missing = CliError::Core(DomainError::MissingDirectory { role: "cmd".into() }.into());
        assert_eq!(missing.exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::InvalidInput {
            message: "no name".into(),
            source: None,
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn snippet_points_at_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("root.go");
        let source = "package cmd\n\nvar x = \"open\n";
        std::fs::write(&path, source).unwrap();

        let err = parse_error(&path, source);
        assert!(err.source_error().is_some());
        let snippet = err.render_snippet(false).unwrap();
        assert!(snippet.contains("root.go"));
        assert!(snippet.contains("var x"));
        assert!(err.format_plain(false).contains(&snippet));
    }

    #[test]
    fn no_snippet_for_other_errors() {
        let err = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        assert!(err.render_snippet(false).is_none());
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { message, .. }) if message == "reading config"));
    }
}
