//! Declaration index: a structural outline of an existing Go source file.
//!
//! The index answers "is there already a top-level declaration of this kind
//! with this name?" and records where imports end so that the emitter can
//! splice new content into the original text. It never evaluates or
//! type-checks anything; bodies and initialisers are skipped by bracket
//! matching.

mod error;
mod lexer;
mod parser;

pub use error::SourceError;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::builder::default_package_name;
use crate::domain::value_objects::DeclKind;
use lexer::Lexer;
use parser::Parser;

/// One indexed top-level name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedDecl {
    pub kind: DeclKind,
    /// Declared name; methods are keyed `Receiver.Name`.
    pub name: String,
    /// Byte range of the spec (or whole declaration when ungrouped).
    pub start: usize,
    pub end: usize,
}

/// One import spec found in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedImport {
    pub path: String,
    /// Explicit name, including `_` and `.`.
    pub alias: Option<String>,
    pub offset: usize,
}

impl IndexedImport {
    /// Name under which the package is visible in the file, if any.
    pub fn local_name(&self) -> Option<String> {
        match self.alias.as_deref() {
            Some("_") | Some(".") => None,
            Some(alias) => Some(alias.to_string()),
            None => Some(default_package_name(&self.path)),
        }
    }
}

/// Where the import section sits inside the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportLayout {
    /// End of the package name in the package clause.
    pub package_end: usize,
    /// End of the last import declaration, if there is one.
    pub last_import_end: Option<usize>,
    /// Offset of the closing `)` when the last import declaration is grouped.
    pub group_close: Option<usize>,
}

/// Structural outline of one Go file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationIndex {
    package: Option<String>,
    imports: Vec<IndexedImport>,
    decls: Vec<IndexedDecl>,
    layout: ImportLayout,
}

impl DeclarationIndex {
    /// Index of a file that does not exist yet: nothing is declared.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(source: &str) -> Result<Self, SourceError> {
        let tokens = Lexer::new(source).tokenize()?;
        let file = Parser::new(source, tokens).parse()?;
        Ok(Self {
            package: Some(file.package),
            imports: file.imports,
            decls: file.decls,
            layout: file.layout,
        })
    }

    /// Whether a top-level declaration of `kind` named `name` exists.
    ///
    /// Matching is exact and case-sensitive; `rootCmd` does not match
    /// `RootCmd`, and a method `Cli.Execute` does not match the function
    /// `Execute`.
    pub fn exists(&self, kind: DeclKind, name: &str) -> bool {
        self.decls.iter().any(|d| d.kind == kind && d.name == name)
    }

    /// Declared names of one kind, sorted and deduplicated.
    pub fn names(&self, kind: DeclKind) -> BTreeSet<&str> {
        self.decls
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.name.as_str())
            .collect()
    }

    /// Names bound at package scope by this file's declarations. Methods and
    /// the blank identifier bind nothing.
    pub fn file_scope_names(&self) -> BTreeSet<&str> {
        self.decls
            .iter()
            .filter(|d| d.kind != DeclKind::Method && d.name != "_")
            .map(|d| d.name.as_str())
            .collect()
    }

    /// Package clause name; `None` for the empty index.
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn imports(&self) -> &[IndexedImport] {
        &self.imports
    }

    pub fn has_import(&self, path: &str) -> bool {
        self.imports.iter().any(|i| i.path == path)
    }

    /// `(path, local name)` for every import usable by qualified references.
    pub fn import_bindings(&self) -> Vec<(String, String)> {
        self.imports
            .iter()
            .filter_map(|i| i.local_name().map(|name| (i.path.clone(), name)))
            .collect()
    }

    pub fn decls(&self) -> &[IndexedDecl] {
        &self.decls
    }

    pub fn layout(&self) -> ImportLayout {
        self.layout
    }

    pub fn is_empty(&self) -> bool {
        self.package.is_none()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
