use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Structural problem found while indexing a Go source file.
///
/// Every variant carries the span of the offending text so callers can render
/// it against the file contents.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum SourceError {
    #[error("unterminated string literal")]
    #[diagnostic(code(rootgen::index::unterminated_string))]
    UnterminatedString {
        #[label("string starts here")]
        span: SourceSpan,
    },

    #[error("unterminated raw string literal")]
    #[diagnostic(code(rootgen::index::unterminated_raw_string))]
    UnterminatedRawString {
        #[label("raw string starts here")]
        span: SourceSpan,
    },

    #[error("unterminated rune literal")]
    #[diagnostic(code(rootgen::index::unterminated_rune))]
    UnterminatedRune {
        #[label("rune starts here")]
        span: SourceSpan,
    },

    #[error("unterminated block comment")]
    #[diagnostic(code(rootgen::index::unterminated_comment))]
    UnterminatedComment {
        #[label("comment starts here")]
        span: SourceSpan,
    },

    #[error("unexpected character '{ch}'")]
    #[diagnostic(code(rootgen::index::unexpected_char))]
    UnexpectedChar {
        ch: char,
        #[label("not valid in Go source")]
        span: SourceSpan,
    },

    #[error("missing package clause")]
    #[diagnostic(
        code(rootgen::index::missing_package),
        help("a Go file must start with `package <name>`")
    )]
    MissingPackage {
        #[label("expected `package` here")]
        span: SourceSpan,
    },

    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(rootgen::index::expected_token))]
    ExpectedToken {
        expected: String,
        found: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("unexpected {found} at top level")]
    #[diagnostic(
        code(rootgen::index::stray_statement),
        help("only const, var, type, func and import declarations may appear at top level")
    )]
    StrayStatement {
        found: String,
        #[label("not a declaration")]
        span: SourceSpan,
    },

    #[error("import declaration after other declarations")]
    #[diagnostic(
        code(rootgen::index::stray_import),
        help("move all imports directly below the package clause")
    )]
    StrayImport {
        #[label("misplaced import")]
        span: SourceSpan,
    },

    #[error("unclosed '{open}'")]
    #[diagnostic(code(rootgen::index::unclosed))]
    Unclosed {
        open: char,
        #[label("opened here")]
        span: SourceSpan,
    },

    #[error("unexpected '{close}'")]
    #[diagnostic(code(rootgen::index::unexpected_close))]
    UnexpectedClose {
        close: char,
        #[label("nothing to close")]
        span: SourceSpan,
    },
}

impl SourceError {
    pub fn span(&self) -> SourceSpan {
        match self {
            Self::UnterminatedString { span }
            | Self::UnterminatedRawString { span }
            | Self::UnterminatedRune { span }
            | Self::UnterminatedComment { span }
            | Self::UnexpectedChar { span, .. }
            | Self::MissingPackage { span }
            | Self::ExpectedToken { span, .. }
            | Self::StrayStatement { span, .. }
            | Self::StrayImport { span }
            | Self::Unclosed { span, .. }
            | Self::UnexpectedClose { span, .. } => *span,
        }
    }

    /// Byte offset of the error inside the indexed source.
    pub fn offset(&self) -> usize {
        self.span().offset()
    }
}
